pub mod header;
pub mod help;
pub mod process_table;
pub mod signal_menu;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

use crate::app::{App, InputMode};

pub fn draw(frame: &mut Frame, app: &App) {
    let header_height = header::height(app.show_per_core);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        &app.theme,
        app.show_per_core,
    );
    process_table::render(
        frame,
        chunks[1],
        &app.snapshot,
        app.selected_index,
        &app.theme,
    );
    statusbar::render(
        frame,
        chunks[2],
        app.input_mode,
        app.status_message.as_ref(),
        &app.keybinds,
        &app.theme,
    );

    // Overlays last so they draw on top
    match app.input_mode {
        InputMode::Help => help::render(frame, frame.area(), &app.help_entries(), &app.theme),
        InputMode::SignalMenu => {
            let target = app
                .snapshot
                .processes
                .top
                .iter()
                .find(|p| p.pid.to_string() == app.pid_input);
            signal_menu::render(frame, frame.area(), &app.pid_input, target, &app.theme);
        }
        InputMode::Normal => {}
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}

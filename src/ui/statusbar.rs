use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds, StatusMessage, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    status_message: Option<&StatusMessage>,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some(status) = status_message {
        let color = if status.ok {
            theme.status_ok
        } else {
            theme.status_err
        };
        let line = Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    match input_mode {
        InputMode::SignalMenu => {
            spans.extend(pill_spans("0-9", "PID", theme));
            spans.extend(pill_spans("t", "Term", theme));
            spans.extend(pill_spans("s", "Stop", theme));
            spans.extend(pill_spans("r", "Cont", theme));
            spans.extend(pill_spans("Esc", "Cancel", theme));
        }
        InputMode::Help => {
            spans.extend(pill_spans("Esc", "Close", theme));
        }
        InputMode::Normal => {
            for (key, desc) in [
                (keybinds.quit, "Quit"),
                (keybinds.signal_menu, "Signal"),
                (keybinds.toggle_cores, "Cores"),
                (keybinds.cycle_theme, "Theme"),
                (keybinds.refresh, "Sample"),
                (keybinds.help, "Help"),
            ] {
                spans.extend(pill_spans(&key_label(key), desc, theme));
            }
            spans.extend(pill_spans("\u{2191}\u{2193}", "Select", theme));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans(key: &str, desc: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}

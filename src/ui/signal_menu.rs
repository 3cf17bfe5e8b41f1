use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::format::truncate_unicode;
use crate::system::control::ProcessSignal;
use crate::system::process::ProcessDescriptor;
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

const MENU_WIDTH: u16 = 44;
// Border, PID line, target line, blank, three actions, cancel, border.
const MENU_HEIGHT: u16 = 9;

/// Prompt for signaling a process. `target` is the matching row of the
/// current top list, if the typed PID is in it.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    pid_input: &str,
    target: Option<&ProcessDescriptor>,
    theme: &Theme,
) {
    let width = MENU_WIDTH.min(area.width.saturating_sub(2));
    let height = MENU_HEIGHT.min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Signal process ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);

    let target_text = match target {
        Some(process) => truncate_unicode(&process.name, inner.width.saturating_sub(9) as usize),
        None if pid_input.is_empty() => "type a PID".to_string(),
        None => "not in the top list".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" PID    ", label),
            Span::styled(pid_input.to_string(), value),
            Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
        ]),
        Line::from(vec![
            Span::styled(" Name   ", label),
            Span::styled(target_text, Style::default().fg(theme.text_primary)),
        ]),
        Line::raw(""),
    ];

    for signal in ProcessSignal::ALL {
        lines.push(action_line(
            &signal.menu_key().to_string(),
            &format!("{} ({})", signal.label(), signal.signal_name()),
            theme,
        ));
    }
    lines.push(action_line("Esc", "Cancel", theme));

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

fn action_line(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {key:>3} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {desc}"), Style::default().fg(theme.pill_desc_fg)),
    ])
}

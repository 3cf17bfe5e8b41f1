use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::truncate_unicode;
use crate::system::process::ProcessDescriptor;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

const NAME_MAX_WIDTH: usize = 40;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    selected_index: usize,
    theme: &Theme,
) {
    let cores = snapshot.cpu.logical_cores.max(1) as f32;

    let header_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(["PID", "NAME", "%CPU", "%MEM", "STATE"]).style(header_style);

    let rows = snapshot
        .processes
        .top
        .iter()
        .enumerate()
        .map(|(idx, process)| process_row(process, cores, idx == selected_index, theme));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " processes (top by %CPU) ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

/// Per-process CPU from the host is per-core scaled (a busy thread on each
/// of four cores reads 400%); the table shows share of the whole machine.
pub fn normalized_cpu(process: &ProcessDescriptor, cores: f32) -> f32 {
    (process.cpu_percent / cores).clamp(0.0, 100.0)
}

fn process_row<'a>(
    process: &'a ProcessDescriptor,
    cores: f32,
    selected: bool,
    theme: &Theme,
) -> Row<'a> {
    let cpu = normalized_cpu(process, cores);
    let text = Style::default().fg(theme.text_primary);

    let row = Row::new([
        Cell::from(format!("{:>7}", process.pid)).style(text),
        Cell::from(truncate_unicode(&process.name, NAME_MAX_WIDTH)).style(text),
        Cell::from(format!("{cpu:>6.1}")).style(Style::default().fg(theme.usage_color(cpu))),
        Cell::from(format!("{:>6.1}", process.memory_percent))
            .style(Style::default().fg(theme.usage_color(process.memory_percent))),
        Cell::from(process.status.name()).style(Style::default().fg(theme.text_secondary)),
    ]);

    if selected {
        row.style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::process::ProcessState;

    #[test]
    fn cpu_is_normalized_by_core_count() {
        let process = ProcessDescriptor {
            pid: 1,
            name: "busy".into(),
            cpu_percent: 200.0,
            memory_percent: 0.0,
            status: ProcessState::Running,
        };
        assert_eq!(normalized_cpu(&process, 4.0), 50.0);
        assert_eq!(normalized_cpu(&process, 1.0), 100.0);
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap};

use crate::format::{format_bytes, format_count_rate, format_rate};
use crate::system::snapshot::Snapshot;
use crate::ui::theme::Theme;

const PANEL_HEIGHT: u16 = 6;
const PER_CORE_HEIGHT: u16 = 2;

pub fn height(show_per_core: bool) -> u16 {
    if show_per_core {
        PANEL_HEIGHT + PER_CORE_HEIGHT
    } else {
        PANEL_HEIGHT
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    theme: &Theme,
    show_per_core: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PANEL_HEIGHT),
            Constraint::Length(if show_per_core { PER_CORE_HEIGHT } else { 0 }),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_usage(frame, columns[0], snapshot, theme);
    render_activity(frame, columns[1], snapshot, theme);

    if show_per_core {
        render_per_core(frame, rows[1], snapshot, theme);
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_usage(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let block = panel(" pulsetop ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 4])
        .split(inner);

    let cpu = snapshot.cpu.total_percent;
    frame.render_widget(
        usage_gauge(theme, cpu, format!("CPU  {cpu:.1}%")),
        lines[0],
    );

    let mem = &snapshot.memory;
    frame.render_widget(
        usage_gauge(
            theme,
            mem.percent,
            format!(
                "MEM  {:.1}% ({} / {})",
                mem.percent,
                format_bytes(mem.used as f64),
                format_bytes(mem.total as f64)
            ),
        ),
        lines[1],
    );

    let swap = &snapshot.swap;
    frame.render_widget(
        usage_gauge(
            theme,
            swap.percent,
            format!(
                "SWAP {:.1}% ({} / {})",
                swap.percent,
                format_bytes(swap.used as f64),
                format_bytes(swap.total as f64)
            ),
        ),
        lines[2],
    );

    let load = snapshot.cpu.load_average;
    let load_line = Line::from(vec![
        Span::styled("Load ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("{:.2} {:.2} {:.2}", load.one, load.five, load.fifteen),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(
            format!("  Cores {}", snapshot.cpu.logical_cores),
            Style::default().fg(theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(load_line), lines[3]);
}

fn usage_gauge<'a>(theme: &Theme, percent: f32, label: String) -> Gauge<'a> {
    let ratio = (percent as f64 / 100.0).clamp(0.0, 1.0);
    Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.usage_color(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(Span::styled(label, Style::default().fg(theme.text_primary)))
}

fn render_activity(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let block = panel(" activity ", theme);
    let rates = &snapshot.rates;
    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default().fg(theme.text_primary);

    let states: Vec<String> = snapshot
        .processes
        .status_counts
        .iter()
        .map(|(state, count)| format!("{} {count}", state.short()))
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::styled("Disk  ", label),
            Span::styled(format!("R {}", format_rate(rates.disk_read)), value),
            Span::styled(" · ", label),
            Span::styled(format!("W {}", format_rate(rates.disk_write)), value),
        ]),
        Line::from(vec![
            Span::styled("Net   ", label),
            Span::styled(format!("\u{2191} {}", format_rate(rates.net_sent)), value),
            Span::styled(" · ", label),
            Span::styled(
                format!("\u{2193} {}", format_rate(rates.net_received)),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Sched ", label),
            Span::styled(
                format!("ctx {}", format_count_rate(rates.context_switches)),
                value,
            ),
            Span::styled(" · ", label),
            Span::styled(
                format!("intr {}", format_count_rate(rates.interrupts)),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Procs ", label),
            Span::styled(snapshot.processes.total.to_string(), value),
            Span::styled(format!("  {}", states.join(" ")), label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_per_core(frame: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let mut spans = Vec::with_capacity(snapshot.cpu.per_core.len() * 2);
    for (idx, usage) in snapshot.cpu.per_core.iter().enumerate() {
        spans.push(Span::styled(
            format!(" cpu{idx} "),
            Style::default().fg(theme.text_secondary),
        ));
        spans.push(Span::styled(
            format!("{usage:>5.1}%"),
            Style::default().fg(theme.usage_color(*usage)),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: false }),
        area,
    );
}

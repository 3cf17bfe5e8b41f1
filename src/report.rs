use std::fmt::Write;

use crate::format::{format_bytes, format_count_rate, format_rate, truncate_unicode};
use crate::system::snapshot::Snapshot;

const NAME_WIDTH: usize = 24;

/// Plain-text rendering of one snapshot for `--once`.
pub fn render_text(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let cpu = &snapshot.cpu;
    let load = cpu.load_average;
    let mem = &snapshot.memory;
    let swap = &snapshot.swap;
    let rates = &snapshot.rates;

    let _ = writeln!(
        out,
        "CPU    {:>5.1}%  cores {}  load {:.2} {:.2} {:.2}",
        cpu.total_percent, cpu.logical_cores, load.one, load.five, load.fifteen
    );
    let _ = writeln!(
        out,
        "MEM    {:>5.1}%  {} / {}",
        mem.percent,
        format_bytes(mem.used as f64),
        format_bytes(mem.total as f64)
    );
    let _ = writeln!(
        out,
        "SWAP   {:>5.1}%  {} / {}",
        swap.percent,
        format_bytes(swap.used as f64),
        format_bytes(swap.total as f64)
    );
    let _ = writeln!(
        out,
        "DISK   read {}  write {}",
        format_rate(rates.disk_read),
        format_rate(rates.disk_write)
    );
    let _ = writeln!(
        out,
        "NET    sent {}  recv {}",
        format_rate(rates.net_sent),
        format_rate(rates.net_received)
    );
    let _ = writeln!(
        out,
        "SCHED  ctx {}  intr {}",
        format_count_rate(rates.context_switches),
        format_count_rate(rates.interrupts)
    );

    let states: Vec<String> = snapshot
        .processes
        .status_counts
        .iter()
        .map(|(state, count)| format!("{state} {count}"))
        .collect();
    let _ = writeln!(
        out,
        "PROCS  {}  {}",
        snapshot.processes.total,
        states.join(", ")
    );

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>7}  {:<NAME_WIDTH$}  {:>6}  {:>6}  STATE",
        "PID", "NAME", "%CPU", "%MEM"
    );
    for process in &snapshot.processes.top {
        let _ = writeln!(
            out,
            "{:>7}  {:<NAME_WIDTH$}  {:>6.1}  {:>6.1}  {}",
            process.pid,
            truncate_unicode(&process.name, NAME_WIDTH),
            process.cpu_percent,
            process.memory_percent,
            process.status
        );
    }

    out
}

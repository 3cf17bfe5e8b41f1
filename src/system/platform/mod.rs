use super::source::SchedulerCounters;

pub trait PlatformExtensions {
    /// Cumulative context switches and interrupts since boot.
    fn scheduler_counters() -> Option<SchedulerCounters>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
mod unsupported;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
use unsupported as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn scheduler_counters() -> Option<SchedulerCounters> {
    platform_impl::Platform::scheduler_counters()
}

/// Parses the `ctxt` and `intr` lines of a `/proc/stat` style table.
///
/// The first number on the `intr` line is the total across all sources.
pub fn parse_proc_stat(contents: &str) -> Option<SchedulerCounters> {
    let mut context_switches = None;
    let mut interrupts = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("ctxt ") {
            context_switches = rest.trim().parse().ok();
        } else if let Some(rest) = line.strip_prefix("intr ") {
            interrupts = rest.split_whitespace().next().and_then(|v| v.parse().ok());
        }
    }
    Some(SchedulerCounters {
        context_switches: context_switches?,
        interrupts: interrupts?,
    })
}

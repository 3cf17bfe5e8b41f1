use super::{PlatformExtensions, SchedulerCounters, parse_proc_stat};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn scheduler_counters() -> Option<SchedulerCounters> {
        let contents = std::fs::read_to_string("/proc/stat").ok()?;
        parse_proc_stat(&contents)
    }
}

use super::{PlatformExtensions, SchedulerCounters};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn scheduler_counters() -> Option<SchedulerCounters> {
        // Mach exposes these per task, not as a host-wide total.
        None
    }
}

use super::{PlatformExtensions, SchedulerCounters};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn scheduler_counters() -> Option<SchedulerCounters> {
        None
    }
}

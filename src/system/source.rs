use std::time::Instant;

use super::process::ProcessProbe;
use super::snapshot::{LoadAverage, MemoryStats, SwapStats};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuReading {
    pub total_percent: f32,
    pub per_core: Vec<f32>,
}

/// Cumulative byte counters, summed over every device or interface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub read_bytes: u64,
    pub written_bytes: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub sent_bytes: u64,
    pub received_bytes: u64,
}

/// Cumulative scheduler activity since boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerCounters {
    pub context_switches: u64,
    pub interrupts: u64,
}

/// Host metrics the sampler reads from.
///
/// `refresh` is called once per snapshot before any getter. Getters returning
/// `Option` report `None` when the host has no such facility.
pub trait MetricsSource {
    fn now(&self) -> Instant;
    fn refresh(&mut self);
    fn cpu(&self) -> CpuReading;
    fn load_average(&self) -> Option<LoadAverage>;
    fn memory(&self) -> Option<MemoryStats>;
    fn swap(&self) -> Option<SwapStats>;
    fn processes(&self) -> Vec<ProcessProbe>;
    fn disk_io(&self) -> Option<DiskCounters>;
    fn net_io(&self) -> Option<NetCounters>;
    fn scheduler_counters(&self) -> Option<SchedulerCounters>;
}

use std::time::Instant;

use serde::Serialize;

use super::process::ProcessSummary;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CpuStats {
    pub total_percent: f32,
    pub per_core: Vec<f32>,
    pub load_average: LoadAverage,
    pub logical_cores: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MemoryStats {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SwapStats {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f32,
}

/// Per-second rates derived from cumulative counters. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rates {
    pub disk_read: f64,
    pub disk_write: f64,
    pub net_sent: f64,
    pub net_received: f64,
    pub context_switches: f64,
    pub interrupts: f64,
}

/// Host state as of one sampling call.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    #[serde(skip)]
    pub taken_at: Instant,
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub swap: SwapStats,
    pub processes: ProcessSummary,
    pub rates: Rates,
}

impl Snapshot {
    /// All-zero snapshot used before the first sample lands.
    pub fn empty(taken_at: Instant) -> Self {
        Self {
            taken_at,
            cpu: CpuStats::default(),
            memory: MemoryStats::default(),
            swap: SwapStats::default(),
            processes: ProcessSummary::default(),
            rates: Rates::default(),
        }
    }
}

pub fn percent_of(part: u64, whole: u64) -> f32 {
    if whole == 0 {
        return 0.0;
    }
    ((part as f64 / whole as f64) * 100.0).clamp(0.0, 100.0) as f32
}

pub fn clamp_percent(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

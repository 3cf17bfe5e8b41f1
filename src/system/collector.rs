use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::time::Instant;

use sysinfo::{Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::platform;
use super::process::{ProcessDescriptor, ProcessProbe};
use super::snapshot::{LoadAverage, MemoryStats, SwapStats, percent_of};
use super::source::{CpuReading, DiskCounters, MetricsSource, NetCounters, SchedulerCounters};

/// [`MetricsSource`] backed by `sysinfo`.
pub struct SysinfoSource {
    sys: System,
    disks: Disks,
    networks: Networks,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        SysinfoSource {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }

    /// Process table handle for the control surface.
    pub fn system(&self) -> &System {
        &self.sys
    }
}

impl MetricsSource for SysinfoSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn refresh(&mut self) {
        let _refresh_span = tracing::trace_span!("source.refresh").entered();

        self.sys.refresh_memory();
        self.sys.refresh_cpu_usage();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        self.disks.refresh(true);
        self.networks.refresh(true);
    }

    fn cpu(&self) -> CpuReading {
        CpuReading {
            total_percent: self.sys.global_cpu_usage(),
            per_core: self.sys.cpus().iter().map(|cpu| cpu.cpu_usage()).collect(),
        }
    }

    fn load_average(&self) -> Option<LoadAverage> {
        let load = System::load_average();
        // Platforms without load averages report all zeros.
        if load.one == 0.0 && load.five == 0.0 && load.fifteen == 0.0 {
            return None;
        }
        Some(LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }

    fn memory(&self) -> Option<MemoryStats> {
        let total = self.sys.total_memory();
        if total == 0 {
            return None;
        }
        let used = self.sys.used_memory();
        Some(MemoryStats {
            total,
            used,
            available: self.sys.available_memory(),
            percent: percent_of(used, total),
        })
    }

    fn swap(&self) -> Option<SwapStats> {
        let total = self.sys.total_swap();
        if total == 0 {
            return None;
        }
        let used = self.sys.used_swap();
        Some(SwapStats {
            total,
            used,
            free: self.sys.free_swap(),
            percent: percent_of(used, total),
        })
    }

    fn processes(&self) -> Vec<ProcessProbe> {
        let total_memory = self.sys.total_memory();
        self.sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                // Entries can linger for one refresh after the process exits.
                if !process.exists() {
                    return None;
                }
                Some(ProcessDescriptor {
                    pid: pid.as_u32(),
                    name: process.name().to_string_lossy().to_string(),
                    cpu_percent: process.cpu_usage(),
                    memory_percent: percent_of(process.memory(), total_memory),
                    status: process.status().into(),
                })
            })
            .collect()
    }

    fn disk_io(&self) -> Option<DiskCounters> {
        if self.disks.list().is_empty() {
            return None;
        }
        let mounts = self.disks.list().iter().map(|disk| {
            let usage = disk.usage();
            let counters = DiskCounters {
                read_bytes: usage.total_read_bytes,
                written_bytes: usage.total_written_bytes,
            };
            (disk.name(), counters)
        });
        Some(sum_disk_counters(mounts))
    }

    fn net_io(&self) -> Option<NetCounters> {
        if self.networks.is_empty() {
            return None;
        }
        let counters = self
            .networks
            .iter()
            .fold(NetCounters::default(), |acc, (_, data)| NetCounters {
                sent_bytes: acc.sent_bytes.saturating_add(data.total_transmitted()),
                received_bytes: acc.received_bytes.saturating_add(data.total_received()),
            });
        Some(counters)
    }

    fn scheduler_counters(&self) -> Option<SchedulerCounters> {
        platform::scheduler_counters()
    }
}

/// Sums per-device counters. `Disks` lists one entry per mount point, so a
/// device mounted twice appears twice; only its first entry counts.
pub fn sum_disk_counters<'a, I>(mounts: I) -> DiskCounters
where
    I: IntoIterator<Item = (&'a OsStr, DiskCounters)>,
{
    let mut devices: BTreeMap<&OsStr, DiskCounters> = BTreeMap::new();
    for (name, counters) in mounts {
        devices.entry(name).or_insert(counters);
    }
    devices.values().fold(DiskCounters::default(), |acc, dev| DiskCounters {
        read_bytes: acc.read_bytes.saturating_add(dev.read_bytes),
        written_bytes: acc.written_bytes.saturating_add(dev.written_bytes),
    })
}

use super::collector::SysinfoSource;
use super::process::summarize_processes;
use super::rate::RateTracker;
use super::snapshot::{CpuStats, Rates, Snapshot, clamp_percent};
use super::source::MetricsSource;

/// One tracker per cumulative counter stream.
#[derive(Debug)]
struct RateTrackers {
    disk_read: RateTracker,
    disk_write: RateTracker,
    net_sent: RateTracker,
    net_received: RateTracker,
    context_switches: RateTracker,
    interrupts: RateTracker,
}

impl Default for RateTrackers {
    fn default() -> Self {
        Self {
            disk_read: RateTracker::new("disk.read"),
            disk_write: RateTracker::new("disk.write"),
            net_sent: RateTracker::new("net.sent"),
            net_received: RateTracker::new("net.received"),
            context_switches: RateTracker::new("cpu.context_switches"),
            interrupts: RateTracker::new("cpu.interrupts"),
        }
    }
}

/// Produces a [`Snapshot`] per call, deriving rates relative to its own
/// previous call.
///
/// `snapshot` takes `&mut self`; share a sampler only behind external
/// mutual exclusion.
pub struct Sampler<S = SysinfoSource> {
    source: S,
    trackers: RateTrackers,
}

impl Default for Sampler<SysinfoSource> {
    fn default() -> Self {
        Self::new(SysinfoSource::new())
    }
}

impl<S: MetricsSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Sampler {
            source,
            trackers: RateTrackers::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot(&mut self) -> Snapshot {
        let _snapshot_span = tracing::debug_span!("sampler.snapshot").entered();

        self.source.refresh();
        let now = self.source.now();

        let cpu = self.source.cpu();
        let load_average = self.source.load_average().unwrap_or_else(|| {
            tracing::debug!("load average unavailable");
            Default::default()
        });
        let memory = self.source.memory().unwrap_or_else(|| {
            tracing::debug!("memory statistics unavailable");
            Default::default()
        });
        let swap = self.source.swap().unwrap_or_default();
        let processes = summarize_processes(self.source.processes());

        let mut rates = Rates::default();
        let trackers = &mut self.trackers;

        match self.source.disk_io() {
            Some(disk) => {
                rates.disk_read = trackers.disk_read.update_at(disk.read_bytes, now);
                rates.disk_write = trackers.disk_write.update_at(disk.written_bytes, now);
            }
            None => tracing::debug!("disk counters unavailable"),
        }

        match self.source.net_io() {
            Some(net) => {
                rates.net_sent = trackers.net_sent.update_at(net.sent_bytes, now);
                rates.net_received = trackers.net_received.update_at(net.received_bytes, now);
            }
            None => tracing::debug!("network counters unavailable"),
        }

        match self.source.scheduler_counters() {
            Some(sched) => {
                rates.context_switches = trackers
                    .context_switches
                    .update_at(sched.context_switches, now);
                rates.interrupts = trackers.interrupts.update_at(sched.interrupts, now);
            }
            None => tracing::debug!("scheduler counters unavailable"),
        }

        let per_core: Vec<f32> = cpu.per_core.into_iter().map(clamp_percent).collect();

        Snapshot {
            taken_at: now,
            cpu: CpuStats {
                total_percent: clamp_percent(cpu.total_percent),
                logical_cores: per_core.len(),
                per_core,
                load_average,
            },
            memory,
            swap,
            processes,
            rates,
        }
    }
}

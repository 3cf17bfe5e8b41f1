#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use pulsetop::system::process::{ProcessDescriptor, ProcessProbe, ProcessState};
use pulsetop::system::snapshot::{LoadAverage, MemoryStats, SwapStats};
use pulsetop::system::source::{
    CpuReading, DiskCounters, MetricsSource, NetCounters, SchedulerCounters,
};

/// Everything the source reports for one refresh.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    /// Offset from the source's start instant.
    pub at: Duration,
    pub cpu: CpuReading,
    pub load_average: Option<LoadAverage>,
    pub memory: Option<MemoryStats>,
    pub swap: Option<SwapStats>,
    pub processes: Vec<ProcessProbe>,
    pub disk: Option<DiskCounters>,
    pub net: Option<NetCounters>,
    pub sched: Option<SchedulerCounters>,
}

impl Frame {
    pub fn at_secs(secs: u64) -> Self {
        Self {
            at: Duration::from_secs(secs),
            ..Self::default()
        }
    }

    pub fn disk(mut self, read_bytes: u64, written_bytes: u64) -> Self {
        self.disk = Some(DiskCounters {
            read_bytes,
            written_bytes,
        });
        self
    }

    pub fn net(mut self, sent_bytes: u64, received_bytes: u64) -> Self {
        self.net = Some(NetCounters {
            sent_bytes,
            received_bytes,
        });
        self
    }

    pub fn sched(mut self, context_switches: u64, interrupts: u64) -> Self {
        self.sched = Some(SchedulerCounters {
            context_switches,
            interrupts,
        });
        self
    }

    pub fn processes(mut self, processes: Vec<ProcessProbe>) -> Self {
        self.processes = processes;
        self
    }
}

/// Replays scripted frames, one per refresh. The last frame repeats once
/// the script runs out.
pub struct ScriptedSource {
    start: Instant,
    pending: VecDeque<Frame>,
    current: Frame,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            start: Instant::now(),
            pending: frames.into(),
            current: Frame::default(),
        }
    }
}

impl MetricsSource for ScriptedSource {
    fn now(&self) -> Instant {
        self.start + self.current.at
    }

    fn refresh(&mut self) {
        if let Some(next) = self.pending.pop_front() {
            self.current = next;
        }
    }

    fn cpu(&self) -> CpuReading {
        self.current.cpu.clone()
    }

    fn load_average(&self) -> Option<LoadAverage> {
        self.current.load_average
    }

    fn memory(&self) -> Option<MemoryStats> {
        self.current.memory
    }

    fn swap(&self) -> Option<SwapStats> {
        self.current.swap
    }

    fn processes(&self) -> Vec<ProcessProbe> {
        self.current.processes.clone()
    }

    fn disk_io(&self) -> Option<DiskCounters> {
        self.current.disk
    }

    fn net_io(&self) -> Option<NetCounters> {
        self.current.net
    }

    fn scheduler_counters(&self) -> Option<SchedulerCounters> {
        self.current.sched
    }
}

pub fn process(pid: u32, cpu_percent: f32, status: ProcessState) -> ProcessProbe {
    Some(ProcessDescriptor {
        pid,
        name: format!("proc_{pid}"),
        cpu_percent,
        memory_percent: 1.0,
        status,
    })
}

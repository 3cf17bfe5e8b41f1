use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Number of processes a snapshot keeps after sorting by CPU.
pub const TOP_PROCESS_LIMIT: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessState {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    Zombie,
    Idle,
    Other,
}

impl ProcessState {
    pub fn name(self) -> &'static str {
        match self {
            ProcessState::Running => "running",
            ProcessState::Sleeping => "sleeping",
            ProcessState::DiskSleep => "disk-sleep",
            ProcessState::Stopped => "stopped",
            ProcessState::Zombie => "zombie",
            ProcessState::Idle => "idle",
            ProcessState::Other => "other",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            ProcessState::Running => "R",
            ProcessState::Sleeping => "S",
            ProcessState::DiskSleep => "D",
            ProcessState::Stopped => "T",
            ProcessState::Zombie => "Z",
            ProcessState::Idle => "I",
            ProcessState::Other => "?",
        }
    }
}

impl From<sysinfo::ProcessStatus> for ProcessState {
    fn from(status: sysinfo::ProcessStatus) -> Self {
        use sysinfo::ProcessStatus;
        match status {
            ProcessStatus::Run => ProcessState::Running,
            ProcessStatus::Sleep => ProcessState::Sleeping,
            ProcessStatus::UninterruptibleDiskSleep => ProcessState::DiskSleep,
            ProcessStatus::Stop | ProcessStatus::Tracing => ProcessState::Stopped,
            ProcessStatus::Zombie => ProcessState::Zombie,
            ProcessStatus::Idle => ProcessState::Idle,
            _ => ProcessState::Other,
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessDescriptor {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub status: ProcessState,
}

/// One entry of a process-table walk. `None` means the process vanished or
/// could not be read between listing and inspection.
pub type ProcessProbe = Option<ProcessDescriptor>;

/// Status name -> count over every process that was read successfully.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<ProcessState, usize>);

impl StatusCounts {
    pub fn record(&mut self, state: ProcessState) {
        *self.0.entry(state).or_insert(0) += 1;
    }

    pub fn get(&self, state: ProcessState) -> usize {
        self.0.get(&state).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcessState, usize)> + '_ {
        self.0.iter().map(|(state, count)| (*state, *count))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessSummary {
    /// Highest CPU consumers, at most [`TOP_PROCESS_LIMIT`].
    pub top: Vec<ProcessDescriptor>,
    pub status_counts: StatusCounts,
    /// Processes read successfully this round. Best effort: transient
    /// processes may be missed.
    pub total: usize,
}

pub fn summarize_processes<I>(probes: I) -> ProcessSummary
where
    I: IntoIterator<Item = ProcessProbe>,
{
    let mut status_counts = StatusCounts::default();
    let mut read = Vec::new();
    let mut skipped = 0usize;

    for probe in probes {
        let Some(mut process) = probe else {
            skipped += 1;
            continue;
        };
        if !process.cpu_percent.is_finite() {
            process.cpu_percent = 0.0;
        }
        if !process.memory_percent.is_finite() {
            process.memory_percent = 0.0;
        }
        status_counts.record(process.status);
        read.push(process);
    }

    if skipped > 0 {
        tracing::trace!(skipped, "processes vanished during enumeration");
    }

    let total = read.len();
    // Stable: equal CPU keeps enumeration order so rows don't flicker.
    read.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    read.truncate(TOP_PROCESS_LIMIT);

    ProcessSummary {
        top: read,
        status_counts,
        total,
    }
}

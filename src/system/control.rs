use sysinfo::{Pid, Signal, System};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessSignal {
    Terminate,
    Suspend,
    Resume,
}

impl ProcessSignal {
    pub const ALL: [ProcessSignal; 3] = [
        ProcessSignal::Terminate,
        ProcessSignal::Suspend,
        ProcessSignal::Resume,
    ];

    pub fn signal(self) -> Signal {
        match self {
            ProcessSignal::Terminate => Signal::Term,
            ProcessSignal::Suspend => Signal::Stop,
            ProcessSignal::Resume => Signal::Continue,
        }
    }

    pub fn signal_name(self) -> &'static str {
        match self {
            ProcessSignal::Terminate => "SIGTERM",
            ProcessSignal::Suspend => "SIGSTOP",
            ProcessSignal::Resume => "SIGCONT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessSignal::Terminate => "Terminate",
            ProcessSignal::Suspend => "Suspend",
            ProcessSignal::Resume => "Resume",
        }
    }

    /// Key that picks this action in the signal menu.
    pub fn menu_key(self) -> char {
        match self {
            ProcessSignal::Terminate => 't',
            ProcessSignal::Suspend => 's',
            ProcessSignal::Resume => 'r',
        }
    }

    pub fn from_menu_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.menu_key() == key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlResult {
    Success(u32, &'static str),
    Failed(u32, String),
    NotFound(u32),
    Unsupported(u32, &'static str),
}

impl ControlResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ControlResult::Success(..))
    }

    pub fn message(&self) -> String {
        match self {
            ControlResult::Success(pid, signal) => format!("Sent {signal} to PID {pid}"),
            ControlResult::Failed(_, err) => err.clone(),
            ControlResult::NotFound(pid) => format!("Process {pid} not found"),
            ControlResult::Unsupported(pid, signal) => {
                format!("{signal} is not supported on this platform (PID {pid})")
            }
        }
    }
}

pub fn signal_process(sys: &System, pid: u32, signal: ProcessSignal) -> ControlResult {
    let sysinfo_pid = Pid::from_u32(pid);
    let Some(process) = sys.process(sysinfo_pid) else {
        return ControlResult::NotFound(pid);
    };

    let signal_name = signal.signal_name();
    match process.kill_with(signal.signal()) {
        Some(true) => ControlResult::Success(pid, signal_name),
        Some(false) => {
            ControlResult::Failed(pid, format!("Failed to send {signal_name} to PID {pid}"))
        }
        None if signal == ProcessSignal::Terminate => {
            // No SIGTERM here, fall back to the platform's plain kill.
            if process.kill() {
                ControlResult::Success(pid, signal_name)
            } else {
                ControlResult::Failed(
                    pid,
                    format!("Failed to terminate PID {pid} (permission denied?)"),
                )
            }
        }
        None => ControlResult::Unsupported(pid, signal_name),
    }
}

use crate::system::control::ProcessSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    OpenSignalMenu,
    CloseSignalMenu,
    UpdatePidInput(String),
    SendSignal(ProcessSignal),
    ToggleHelp,
    TogglePerCore,
    CycleTheme,
    Refresh,
    None,
}

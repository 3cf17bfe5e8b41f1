use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::system::control::{ControlResult, ProcessSignal, signal_process};
use crate::system::process::ProcessDescriptor;
use crate::system::sampler::Sampler;
use crate::system::snapshot::Snapshot;
use crate::ui::theme::{ColorSupport, HeatOverrides, Theme, resolve_color_support};

/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(3);
const MAX_PID_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    SignalMenu,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub signal_menu: KeyCode,
    pub help: KeyCode,
    pub toggle_cores: KeyCode,
    pub cycle_theme: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            signal_menu: parse_key(&kb.signal_menu).unwrap_or(KeyCode::Char('k')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            toggle_cores: parse_key(&kb.toggle_cores).unwrap_or(KeyCode::Char('c')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.signal_menu), "Signal process"),
            (key_label(self.toggle_cores), "Toggle per-core CPU"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.refresh), "Sample now"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Select process"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub ok: bool,
    pub created: Instant,
}

impl StatusMessage {
    fn new(text: impl Into<String>, ok: bool) -> Self {
        Self {
            text: text.into(),
            ok,
            created: Instant::now(),
        }
    }
}

pub struct App {
    pub running: bool,
    pub sampler: Sampler,
    pub snapshot: Snapshot,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub pid_input: String,
    pub show_per_core: bool,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub status_message: Option<StatusMessage>,
    pub keybinds: ResolvedKeybinds,
    heat_overrides: HeatOverrides,
}

impl App {
    /// `snapshot` should come from a primed sampler so the first frame
    /// already has CPU usage and non-bootstrap rates.
    pub fn from_parts(config: &Config, sampler: Sampler, snapshot: Snapshot) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let heat_overrides = HeatOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &heat_overrides, color_support);

        App {
            running: true,
            sampler,
            snapshot,
            selected_index: 0,
            input_mode: InputMode::Normal,
            pid_input: String::new(),
            show_per_core: config.general.show_per_core,
            theme,
            color_support,
            status_message: None,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            heat_overrides,
        }
    }

    pub fn refresh_data(&mut self) {
        self.snapshot = self.sampler.snapshot();
        self.clamp_selection();

        if let Some(status) = &self.status_message
            && status.created.elapsed() >= STATUS_TTL
        {
            self.status_message = None;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.snapshot.processes.top.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn selected_process(&self) -> Option<&ProcessDescriptor> {
        self.snapshot.processes.top.get(self.selected_index)
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::SignalMenu => self.map_key_signal_menu(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Arrow keys are hardwired (not configurable)
        if let KeyCode::Up = code {
            return Action::Navigate(Direction::Up);
        }
        if let KeyCode::Down = code {
            return Action::Navigate(Direction::Down);
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.signal_menu {
            return Action::OpenSignalMenu;
        }
        if code == kb.toggle_cores {
            return Action::TogglePerCore;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_signal_menu(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::CloseSignalMenu,
            KeyCode::Backspace => {
                let mut text = self.pid_input.clone();
                text.pop();
                Action::UpdatePidInput(text)
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.pid_input.len() >= MAX_PID_DIGITS {
                    return Action::None;
                }
                let mut text = self.pid_input.clone();
                text.push(c);
                Action::UpdatePidInput(text)
            }
            KeyCode::Char(c) => ProcessSignal::from_menu_key(c.to_ascii_lowercase())
                .map(Action::SendSignal)
                .unwrap_or(Action::None),
            _ => Action::None,
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::OpenSignalMenu => {
                self.pid_input = self
                    .selected_process()
                    .map(|p| p.pid.to_string())
                    .unwrap_or_default();
                self.input_mode = InputMode::SignalMenu;
            }
            Action::CloseSignalMenu => {
                self.pid_input.clear();
                self.input_mode = InputMode::Normal;
            }
            Action::UpdatePidInput(text) => {
                self.pid_input = text;
            }
            Action::SendSignal(signal) => self.send_signal(signal),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::TogglePerCore => {
                self.show_per_core = !self.show_per_core;
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(&self.heat_overrides, self.color_support);
            }
            Action::Refresh => self.refresh_data(),
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.snapshot.processes.top.len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => (self.selected_index + 1).min(len - 1),
        };
    }

    fn send_signal(&mut self, signal: ProcessSignal) {
        let pid = match self.pid_input.parse::<u32>() {
            Ok(pid) if pid != 0 => pid,
            _ => {
                self.status_message = Some(StatusMessage::new("Invalid PID", false));
                return;
            }
        };

        let result = signal_process(self.sampler.source().system(), pid, signal);
        self.set_control_status(&result);
        self.pid_input.clear();
        self.input_mode = InputMode::Normal;
    }

    fn set_control_status(&mut self, result: &ControlResult) {
        let text = result.message();
        if result.is_success() {
            tracing::info!(result = %text, "process control");
        } else {
            tracing::warn!(result = %text, "process control failed");
        }
        self.status_message = Some(StatusMessage::new(text, result.is_success()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::process::{ProcessState, ProcessSummary, summarize_processes};

    fn make_test_process(pid: u32, name: &str, cpu: f32) -> ProcessDescriptor {
        ProcessDescriptor {
            pid,
            name: name.to_string(),
            cpu_percent: cpu,
            memory_percent: 1.5,
            status: ProcessState::Running,
        }
    }

    fn make_test_app(procs: Vec<ProcessDescriptor>) -> App {
        let mut snapshot = Snapshot::empty(Instant::now());
        snapshot.processes = summarize_processes(procs.into_iter().map(Some));
        let mut config = Config::default();
        config.general.color_support = "truecolor".to_string();
        App::from_parts(&config, Sampler::default(), snapshot)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn three_procs() -> Vec<ProcessDescriptor> {
        vec![
            make_test_process(10, "low", 1.0),
            make_test_process(20, "high", 80.0),
            make_test_process(30, "mid", 20.0),
        ]
    }

    #[test]
    fn navigation_stays_in_bounds() {
        let mut app = make_test_app(three_procs());
        app.dispatch(Action::Navigate(Direction::Up));
        assert_eq!(app.selected_index, 0);
        app.dispatch(Action::Navigate(Direction::Down));
        app.dispatch(Action::Navigate(Direction::Down));
        app.dispatch(Action::Navigate(Direction::Down));
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.selected_process().map(|p| p.pid), Some(10));
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let mut app = make_test_app(three_procs());
        app.selected_index = 2;
        app.snapshot.processes = ProcessSummary::default();
        app.clamp_selection();
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_process().is_none());
    }

    #[test]
    fn signal_menu_prefills_selected_pid() {
        let mut app = make_test_app(three_procs());
        app.dispatch(app.map_key(key(KeyCode::Char('k'))));
        assert_eq!(app.input_mode, InputMode::SignalMenu);
        assert_eq!(app.pid_input, "20");
    }

    #[test]
    fn signal_menu_edits_pid_digits() {
        let mut app = make_test_app(three_procs());
        app.dispatch(Action::OpenSignalMenu);
        app.dispatch(app.map_key(key(KeyCode::Backspace)));
        app.dispatch(app.map_key(key(KeyCode::Backspace)));
        app.dispatch(app.map_key(key(KeyCode::Char('7'))));
        assert_eq!(app.pid_input, "7");

        // Letters that aren't menu actions are ignored.
        assert_eq!(app.map_key(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(
            app.map_key(key(KeyCode::Char('s'))),
            Action::SendSignal(ProcessSignal::Suspend)
        );
        assert_eq!(
            app.map_key(key(KeyCode::Char('R'))),
            Action::SendSignal(ProcessSignal::Resume)
        );

        app.dispatch(app.map_key(key(KeyCode::Esc)));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.pid_input.is_empty());
    }

    #[test]
    fn invalid_pid_keeps_menu_open() {
        let mut app = make_test_app(Vec::new());
        app.dispatch(Action::OpenSignalMenu);
        assert!(app.pid_input.is_empty());
        app.dispatch(Action::SendSignal(ProcessSignal::Terminate));
        assert_eq!(app.input_mode, InputMode::SignalMenu);
        let status = app.status_message.as_ref().expect("status message");
        assert_eq!(status.text, "Invalid PID");
        assert!(!status.ok);
    }

    #[test]
    fn signaling_missing_pid_reports_not_found() {
        let mut app = make_test_app(Vec::new());
        app.dispatch(Action::OpenSignalMenu);
        app.dispatch(Action::UpdatePidInput(u32::MAX.to_string()));
        app.dispatch(Action::SendSignal(ProcessSignal::Terminate));
        assert_eq!(app.input_mode, InputMode::Normal);
        let status = app.status_message.as_ref().expect("status message");
        assert_eq!(status.text, format!("Process {} not found", u32::MAX));
    }

    #[test]
    fn default_keybinds_map_to_actions() {
        let app = make_test_app(three_procs());
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.map_key(key(KeyCode::Char('c'))), Action::TogglePerCore);
        assert_eq!(app.map_key(key(KeyCode::Char('t'))), Action::CycleTheme);
        assert_eq!(app.map_key(key(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(app.map_key(key(KeyCode::Char('?'))), Action::ToggleHelp);
        assert_eq!(
            app.map_key(key(KeyCode::Down)),
            Action::Navigate(Direction::Down)
        );

        // Ctrl+C always quits
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn custom_keybind_remap_works() {
        let mut app = make_test_app(three_procs());
        app.keybinds.quit = KeyCode::Char('x');
        assert_eq!(app.map_key(key(KeyCode::Char('x'))), Action::Quit);
        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::None);
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = make_test_app(three_procs());
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help());

        assert_eq!(app.map_key(key(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.map_key(key(KeyCode::Char('k'))), Action::None);
        assert_eq!(app.map_key(key(KeyCode::Esc)), Action::ToggleHelp);

        app.dispatch(Action::ToggleHelp);
        assert!(!app.show_help());
    }

    #[test]
    fn toggles_flip_view_state() {
        let mut app = make_test_app(three_procs());
        assert!(!app.show_per_core);
        app.dispatch(Action::TogglePerCore);
        assert!(app.show_per_core);

        let before = app.theme.name;
        app.dispatch(Action::CycleTheme);
        assert_ne!(app.theme.name, before);
    }

    #[test]
    fn help_entries_list_configured_keys() {
        let app = make_test_app(Vec::new());
        let entries = app.help_entries();
        assert!(
            entries
                .iter()
                .any(|(k, d)| k == "k" && *d == "Signal process")
        );
        assert!(entries.iter().any(|(k, _)| k == "Ctrl+C"));
    }
}

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Report, Result, eyre};
use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub show_per_core: bool,
    pub color_support: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            show_per_core: false,
            color_support: "auto".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub heat_low: String,
    pub heat_mid: String,
    pub heat_high: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            heat_low: "#2d5a27".to_string(),
            heat_mid: "#b5890a".to_string(),
            heat_high: "#a12e2e".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub signal_menu: String,
    pub help: String,
    pub toggle_cores: String,
    pub cycle_theme: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            signal_menu: "k".to_string(),
            help: "?".to_string(),
            toggle_cores: "c".to_string(),
            cycle_theme: "t".to_string(),
            refresh: "r".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pulsetop").join("config.toml"))
}

/// Loads `explicit`, or the default location when it exists.
///
/// Any error falls back to defaults and is handed back so the caller can log
/// it once a subscriber is installed.
pub fn load_config(explicit: Option<&Path>) -> (Config, Option<Report>) {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.exists() => path,
            _ => return (Config::default(), None),
        },
    };
    match load_config_from_path(&path) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre!("unreadable config {}: {e}", path.display()))?;
    toml::from_str(&contents).map_err(|e| eyre!("invalid config {}: {e}", path.display()))
}

/// Parses a keybind name such as `"q"`, `"Enter"` or `"F5"`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" => Some(KeyCode::Char(' ')),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

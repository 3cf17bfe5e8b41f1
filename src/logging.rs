use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

/// JSON-lines subscriber writing to `output_path`. The terminal belongs to
/// the dashboard, so this is the only sink in interactive mode.
pub fn init_file_logging(output_path: &Path, level: &str) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)?;

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_env_filter(build_filter(level)?)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

/// Plain subscriber on stderr for headless runs.
pub fn init_stderr_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level)?)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| eyre!("invalid log level `{level}`: {e}"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn filter_accepts_levels_and_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("pulsetop=debug,warn").is_ok());
    }

    #[test]
    fn filter_rejects_garbage() {
        assert!(build_filter("pulsetop=loud").is_err());
    }
}

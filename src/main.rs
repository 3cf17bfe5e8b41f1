use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::Report;
use crossterm::event::KeyEventKind;

use pulsetop::app::App;
use pulsetop::config::{Config, load_config};
use pulsetop::event::{Event, EventHandler, TICK_RATE};
use pulsetop::system::sampler::Sampler;
use pulsetop::system::snapshot::Snapshot;
use pulsetop::{logging, report, ui};

#[derive(Parser)]
#[command(
    name = "pulsetop",
    about = "Live terminal dashboard for CPU, memory, I/O rates and top processes"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Theme: dark, light, vivid, mono
    #[arg(long)]
    theme: Option<String>,

    /// Show per-core CPU usage on startup
    #[arg(long, default_value_t = false)]
    per_core: bool,

    /// Take one sample, print it and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, print the snapshot as JSON.
    #[arg(long, default_value_t = false, requires = "once")]
    json: bool,

    /// Write JSON logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `info` or `pulsetop=debug`.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config, config_error) = load_config_for_cli(&cli);

    if let Some(path) = &config.logging.file {
        logging::init_file_logging(path, &config.logging.level)?;
    } else if cli.once && cli.log_level.is_some() {
        logging::init_stderr_logging(&config.logging.level)?;
    }
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "config fallback, using defaults");
    }

    if cli.once {
        return run_once(cli.json).await;
    }

    tracing::info!("starting dashboard");

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &config).await;

    ratatui::restore();
    tracing::info!("dashboard stopped");

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: &Config) -> Result<()> {
    let (sampler, snapshot) = primed_sampler(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    let mut app = App::from_parts(config, sampler, snapshot);
    let mut events = EventHandler::new(TICK_RATE);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    true
                } else {
                    false
                }
            }
            Event::Tick => {
                app.refresh_data();
                true
            }
            Event::Resize => true,
        };
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

/// Bootstrap sample, `wait`, then a sample with real CPU usage and rates.
/// The wait yields to the runtime instead of blocking the thread.
async fn primed_sampler(wait: Duration) -> (Sampler, Snapshot) {
    let mut sampler = Sampler::default();
    sampler.snapshot();
    tokio::time::sleep(wait).await;
    let snapshot = sampler.snapshot();
    (sampler, snapshot)
}

async fn run_once(json: bool) -> Result<()> {
    let (_, snapshot) = primed_sampler(TICK_RATE).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", report::render_text(&snapshot));
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> (Config, Option<Report>) {
    let (mut config, error) = load_config(cli.config.as_deref());

    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if cli.per_core {
        config.general.show_per_core = true;
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    (config, error)
}

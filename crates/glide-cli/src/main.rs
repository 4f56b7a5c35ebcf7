use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glide_core::AppConfig;

mod commands;

use commands::simulate::{ScriptedEvent, SimulateArgs};

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Terminal carousel and scroll-slider")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (default: ~/.config/glide/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal host
    Run,
    /// Run a carousel headless on a simulated clock and print its timeline
    Simulate {
        /// Number of slides
        #[arg(long, default_value_t = 4)]
        slides: usize,
        /// Auto-advance interval in milliseconds
        #[arg(long, default_value_t = 4000)]
        interval_ms: u64,
        /// Simulated time to run for, in milliseconds
        #[arg(long)]
        elapsed_ms: u64,
        /// Host tick period in milliseconds (default: tick exactly on each deadline)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        step_ms: Option<u64>,
        /// Start with auto-advance off
        #[arg(long)]
        no_autoplay: bool,
        /// Keep advancing while hovered
        #[arg(long)]
        no_pause_on_hover: bool,
        /// Scripted input as MS:ACTION (next, prev, goto=N, hover-enter, hover-leave, stop, start)
        #[arg(short, long = "event")]
        events: Vec<ScriptedEvent>,
        /// Print the timeline as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Install the log subscriber. `RUST_LOG` wins over the configured level;
/// without it the terminal host logs nothing so the screen stays clean.
fn init_logging(log_level: &str, interactive: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) if interactive => EnvFilter::new("off"),
        Err(_) => EnvFilter::new(log_level),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(AppConfig::load_from(&config_path)?);

    let interactive = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config.general.log_level, interactive);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Simulate {
            slides,
            interval_ms,
            elapsed_ms,
            step_ms,
            no_autoplay,
            no_pause_on_hover,
            events,
            json,
        }) => {
            let args = SimulateArgs {
                slides,
                interval_ms,
                elapsed_ms,
                step_ms,
                autoplay: !no_autoplay,
                pause_on_hover: !no_pause_on_hover,
                events,
            };
            commands::simulate::run(args, json)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}

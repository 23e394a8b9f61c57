//! SheetPilot - voice and text driven timesheet filling.
//!
//! Main entry point for the SheetPilot CLI and server.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sheetpilot_config::{Config, ConfigLoader, ConfigValidator};

mod cli;
mod cmd_config;
mod cmd_serve;
mod cmd_timesheet;

use cli::{Cli, Commands};

/// Per-user data directory (`~/.local/share/sheetpilot` on Linux).
fn sheetpilot_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("sheetpilot"))
        .unwrap_or_else(|| PathBuf::from(".sheetpilot"))
}

/// Initialize tracing with console and file output.
///
/// Log files rotate daily under `<data dir>/sheetpilot/logs`.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = sheetpilot_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("sheetpilot")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the background writer.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load and validate the configuration, logging warnings.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        None => cmd_serve::run_server(&cli.config, None, None).await,
        Some(Commands::Run { host, port }) => cmd_serve::run_server(&cli.config, host, port).await,
        Some(Commands::Normalize { file, ungrouped }) => {
            cmd_timesheet::normalize(&cli.config, &file, ungrouped)
        }
        Some(Commands::Extract { text, ungrouped }) => {
            cmd_timesheet::extract(&cli.config, &text, ungrouped).await
        }
        Some(Commands::Fill {
            file,
            preview,
            ungrouped,
        }) => cmd_timesheet::fill(&cli.config, &file, preview, ungrouped).await,
        Some(Commands::CheckConfig) => cmd_config::check_config(&cli.config),
    }
}

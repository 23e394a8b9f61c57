//! `run` subcommand: serve the HTTP API.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use sheetpilot_api::{ApiServer, AppState, ServerConfig};
use sheetpilot_browser::{ChromeLauncher, LaunchOptions};
use sheetpilot_config::Config;
use sheetpilot_intake::{HttpTranscriber, OllamaGenerator};

use crate::load_config;

/// Wire the production collaborators behind the handler state.
pub(crate) fn build_state(config: Config) -> AppState {
    let transcriber = Arc::new(HttpTranscriber::from_config(&config.speech));
    let generator = Arc::new(OllamaGenerator::from_config(&config.llm));
    let launcher = Arc::new(ChromeLauncher::new(LaunchOptions::from_config(&config)));
    AppState::new(config, transcriber, generator, launcher)
}

/// Run the server in foreground.
pub(crate) async fn run_server(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting SheetPilot v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    std::fs::create_dir_all(config.artifacts.dir_path())?;
    info!("Form: {}", config.form.url);
    info!("Model: {} at {}", config.llm.model, config.llm.base_url);
    info!("Snapshots: {}", config.artifacts.dir_path().display());

    let server_config = ServerConfig::from(&config.server);
    let server = ApiServer::new(server_config, Arc::new(build_state(config)));
    server.run().await
}

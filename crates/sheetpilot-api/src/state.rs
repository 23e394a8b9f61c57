//! Application state.

use std::sync::Arc;
use std::time::Instant;

use sheetpilot_config::Config;
use sheetpilot_core::{FillOrchestrator, RowMode};
use sheetpilot_protocols::{BrowserLauncher, TextGenerator, Transcriber};

/// State shared across handlers.
pub struct AppState {
    pub config: Config,
    pub transcriber: Arc<dyn Transcriber>,
    pub generator: Arc<dyn TextGenerator>,
    pub launcher: Arc<dyn BrowserLauncher>,
    pub orchestrator: Arc<FillOrchestrator>,
    start_time: Instant,
}

impl AppState {
    pub fn new(
        config: Config,
        transcriber: Arc<dyn Transcriber>,
        generator: Arc<dyn TextGenerator>,
        launcher: Arc<dyn BrowserLauncher>,
    ) -> Self {
        let orchestrator = Arc::new(FillOrchestrator::from_config(&config));
        Self {
            config,
            transcriber,
            generator,
            launcher,
            orchestrator,
            start_time: Instant::now(),
        }
    }

    /// Row mode used when a request does not say.
    pub fn default_row_mode(&self) -> RowMode {
        RowMode::from_group_flag(self.config.form.group_rows)
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

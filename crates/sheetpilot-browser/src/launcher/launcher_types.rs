//! Launcher type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use sheetpilot_config::Config;
use sheetpilot_protocols::DriverError;

use crate::cdp::CdpError;

/// Browser launch errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Chrome not found. Please install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),

    #[error("Chrome did not open its debugging endpoint {endpoint} within {waited_ms} ms")]
    StartupTimeout { endpoint: String, waited_ms: u64 },

    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BrowserError> for DriverError {
    fn from(e: BrowserError) -> Self {
        DriverError::LaunchFailed(e.to_string())
    }
}

/// Frame capture settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOptions {
    pub interval: Duration,
    /// Parent directory; each session records into its own subdirectory.
    pub dir: PathBuf,
}

/// How sessions get a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Attach to this debugging endpoint instead of launching Chrome.
    pub endpoint: Option<String>,
    /// Chrome executable; searched in the usual places when unset.
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub recording: Option<RecordingOptions>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl LaunchOptions {
    pub fn from_config(config: &Config) -> Self {
        let browser = &config.browser;
        Self {
            endpoint: browser.endpoint.clone(),
            chrome_path: browser.chrome_path.as_ref().map(PathBuf::from),
            headless: browser.headless,
            window_width: browser.window_width,
            window_height: browser.window_height,
            recording: config.recording.enabled.then(|| RecordingOptions {
                interval: config.recording.interval(),
                dir: PathBuf::from(&config.recording.dir),
            }),
        }
    }
}

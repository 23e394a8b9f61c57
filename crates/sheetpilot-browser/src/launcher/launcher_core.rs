//! ChromeLauncher core: process startup, endpoint discovery, session setup.

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};
use uuid::Uuid;

use sheetpilot_protocols::{BrowserLauncher, DriverError, FormDriver};

use super::{BrowserError, LaunchOptions};
use crate::cdp::{CdpClient, PageSession};
use crate::driver::CdpFormDriver;
use crate::recorder::ScreenRecorder;

const STARTUP_POLL: Duration = Duration::from_millis(200);
const STARTUP_ATTEMPTS: u32 = 50;

/// A Chrome process owned by one session.
pub(crate) struct ChromeProcess {
    child: Child,
    port: u16,
    profile_dir: PathBuf,
}

impl ChromeProcess {
    pub(crate) fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Kill the process and delete its profile.
    pub(crate) async fn shutdown(mut self) {
        if let Err(e) = self.child.kill().await {
            debug!(error = %e, "Chrome already exited");
        }
        if let Err(e) = tokio::fs::remove_dir_all(&self.profile_dir).await {
            warn!(dir = %self.profile_dir.display(), error = %e, "Failed to remove Chrome profile");
        }
        info!(port = self.port, "Chrome shut down");
    }
}

/// Starts a fresh browser session for every fill.
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    options: LaunchOptions,
}

impl ChromeLauncher {
    pub fn new(options: LaunchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Find a Chrome executable in the usual install locations.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Ask the OS for a currently unused local port.
    pub(crate) fn free_port() -> Result<u16, BrowserError> {
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        Ok(listener.local_addr()?.port())
    }

    /// Command-line arguments for a session's Chrome.
    pub(crate) fn chrome_args(&self, port: u16, profile_dir: &Path) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", port),
            format!("--user-data-dir={}", profile_dir.display()),
            format!(
                "--window-size={},{}",
                self.options.window_width, self.options.window_height
            ),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];
        if self.options.headless {
            args.push("--headless=new".to_string());
        }
        args.push("about:blank".to_string());
        args
    }

    async fn spawn_chrome(&self) -> Result<ChromeProcess, BrowserError> {
        let chrome_path = match &self.options.chrome_path {
            Some(path) => path.clone(),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?,
        };
        let port = Self::free_port()?;
        let profile_dir = std::env::temp_dir().join(format!("sheetpilot-chrome-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&profile_dir).await?;

        let child = Command::new(&chrome_path)
            .args(self.chrome_args(port, &profile_dir))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!(pid = ?child.id(), port, "Chrome launched");

        let process = ChromeProcess {
            child,
            port,
            profile_dir,
        };

        let endpoint = process.endpoint();
        if let Err(e) = wait_for_endpoint(&endpoint, STARTUP_ATTEMPTS).await {
            process.shutdown().await;
            return Err(e);
        }
        Ok(process)
    }

    /// Connect to the browser, open a blank tab and wrap it in a driver.
    pub async fn start(&self) -> Result<CdpFormDriver, BrowserError> {
        let (endpoint, process) = match &self.options.endpoint {
            Some(endpoint) => (endpoint.clone(), None),
            None => {
                let process = self.spawn_chrome().await?;
                (process.endpoint(), Some(process))
            }
        };

        let (client, page) = match open_page(&endpoint).await {
            Ok(pair) => pair,
            Err(e) => {
                if let Some(process) = process {
                    process.shutdown().await;
                }
                return Err(e);
            }
        };
        info!(endpoint = %endpoint, browser = client.browser(), "Browser session ready");

        let page = Arc::new(page);
        let recorder = self.options.recording.as_ref().map(|recording| {
            let dir = recording.dir.join(format!("session-{}", Uuid::new_v4()));
            ScreenRecorder::start(page.clone(), dir, recording.interval)
        });

        Ok(CdpFormDriver::new(Arc::new(client), page, process, recorder))
    }
}

async fn open_page(endpoint: &str) -> Result<(CdpClient, PageSession), BrowserError> {
    let client = CdpClient::connect(endpoint).await?;
    let page = client.new_page(None).await?;
    Ok((client, page))
}

/// Poll `/json/version` until the debugging endpoint answers.
pub(crate) async fn wait_for_endpoint(endpoint: &str, attempts: u32) -> Result<(), BrowserError> {
    let url = format!("{}/json/version", endpoint);
    for _ in 0..attempts {
        if let Ok(response) = reqwest::get(&url).await {
            if response.status().is_success() {
                return Ok(());
            }
        }
        tokio::time::sleep(STARTUP_POLL).await;
    }
    Err(BrowserError::StartupTimeout {
        endpoint: endpoint.to_string(),
        waited_ms: (STARTUP_POLL * attempts).as_millis() as u64,
    })
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn FormDriver>, DriverError> {
        let driver = self.start().await?;
        Ok(Box::new(driver))
    }
}

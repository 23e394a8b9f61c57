//! [`FormDriver`] over a CDP page session.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info};

use sheetpilot_protocols::{DriverError, FormDriver};

use crate::cdp::{CdpClient, CdpError, PageSession, ScreenshotFormat};
use crate::launcher::ChromeProcess;
use crate::recorder::ScreenRecorder;

/// One browser tab pointed at the timesheet form.
///
/// Owns the Chrome process when the launcher started one; closing the
/// driver then also stops Chrome and deletes its profile.
pub struct CdpFormDriver {
    client: Arc<CdpClient>,
    page: Arc<PageSession>,
    chrome: tokio::sync::Mutex<Option<ChromeProcess>>,
    recorder: parking_lot::Mutex<Option<ScreenRecorder>>,
    closed: AtomicBool,
}

impl CdpFormDriver {
    pub(crate) fn new(
        client: Arc<CdpClient>,
        page: Arc<PageSession>,
        chrome: Option<ChromeProcess>,
        recorder: Option<ScreenRecorder>,
    ) -> Self {
        Self {
            client,
            page,
            chrome: tokio::sync::Mutex::new(chrome),
            recorder: parking_lot::Mutex::new(recorder),
            closed: AtomicBool::new(false),
        }
    }

    pub fn page(&self) -> &PageSession {
        &self.page
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DriverError::SessionLost("driver already closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FormDriver for CdpFormDriver {
    async fn open(
        &self,
        url: &str,
        ready_element: &str,
        timeout: Duration,
    ) -> Result<String, DriverError> {
        self.ensure_open()?;
        let deadline = Instant::now() + timeout;

        self.page.navigate(url).await?;
        self.page
            .wait_for_load(timeout)
            .await
            .map_err(|e| match e {
                CdpError::Timeout { .. } => {
                    DriverError::Navigation(format!("{} did not finish loading", url))
                }
                other => other.into(),
            })?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        self.page
            .wait_for_element(ready_element, remaining)
            .await
            .map_err(|e| match e {
                CdpError::Timeout { .. } => DriverError::UnexpectedPage(format!(
                    "'{}' not found on {} within {} s",
                    ready_element,
                    url,
                    timeout.as_secs()
                )),
                other => other.into(),
            })?;

        Ok(self.page.title().await?)
    }

    async fn wait_for_element(
        &self,
        element_id: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        self.ensure_open()?;
        Ok(self.page.wait_for_element(element_id, timeout).await?)
    }

    async fn type_into(
        &self,
        element_id: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.page.wait_until_interactable(element_id, timeout).await?;
        self.page.fill_by_id(element_id, text).await?;
        debug!(element = element_id, "Typed value");
        Ok(())
    }

    async fn select_option(
        &self,
        element_id: &str,
        value: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.page.wait_until_interactable(element_id, timeout).await?;
        self.page.select_by_id(element_id, value).await?;
        debug!(element = element_id, value, "Selected option");
        Ok(())
    }

    async fn click(&self, element_id: &str, timeout: Duration) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.page.wait_until_interactable(element_id, timeout).await?;
        self.page.click_by_id(element_id).await?;
        Ok(())
    }

    async fn snapshot(&self, path: &Path) -> Result<(), DriverError> {
        self.ensure_open()?;
        let png = self
            .page
            .screenshot(ScreenshotFormat::Png, None)
            .await
            .map_err(|e| DriverError::Snapshot(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, png).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let recorder = self.recorder.lock().take();
        if let Some(recorder) = recorder {
            recorder.stop().await;
        }

        match self.chrome.lock().await.take() {
            Some(chrome) => {
                if let Err(e) = self.client.close_browser().await {
                    debug!(error = %e, "Browser.close failed, killing Chrome");
                }
                chrome.shutdown().await;
            }
            None => {
                // Attached to a shared browser: only close our tab.
                self.client.close_page(self.page.target_id()).await?;
            }
        }

        info!("Browser session closed");
        Ok(())
    }
}

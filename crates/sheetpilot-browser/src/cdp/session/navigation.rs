//! Navigation for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;
use super::dom::{POLL_INTERVAL, probe_wait};

impl PageSession {
    /// Start navigating to `url`. Returns the frame id.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        debug!("Navigating to {}", url);
        Ok(result["frameId"].as_str().unwrap_or("main").to_string())
    }

    /// Wait until the document is at least interactive.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let result = self
                .evaluate_within("document.readyState", probe_wait(start, timeout))
                .await?;

            if matches!(result.as_str(), Some("complete" | "interactive")) {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout {
                    what: "page load".to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn title(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

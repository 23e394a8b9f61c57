//! Core session struct and CDP command dispatch.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::client::Transport;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::ScreenshotFormat;

/// A session attached to a single page/target.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    pub(super) transport: Arc<Transport>,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, transport: Arc<Transport>) -> Self {
        Self {
            target_id,
            session_id,
            transport,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Like [`call`](Self::call) but gives up on the reply after `timeout`.
    pub async fn call_within(
        &self,
        method: &str,
        params: Option<Value>,
        timeout: Duration,
    ) -> Result<Value, CdpError> {
        self.transport
            .call_within(method, params, Some(&self.session_id), timeout)
            .await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Capture the viewport and return the decoded image bytes.
    pub async fn screenshot(
        &self,
        format: ScreenshotFormat,
        quality: Option<u8>,
    ) -> Result<Vec<u8>, CdpError> {
        let mut params = json!({ "format": format });

        if let Some(q) = quality {
            params["quality"] = json!(q);
        }

        let result = self.call("Page.captureScreenshot", Some(params)).await?;

        let data = result["data"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing screenshot data".to_string()))?;

        STANDARD
            .decode(data)
            .map_err(|e| CdpError::InvalidResponse(format!("Screenshot is not base64: {}", e)))
    }
}

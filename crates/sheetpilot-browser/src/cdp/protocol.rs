//! DevTools wire messages and the `/json` HTTP payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::CdpError;

/// Outgoing command. `session_id` routes it to an attached page.
#[derive(Debug, Serialize)]
pub struct CdpRequest<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Incoming frame: a command reply when `id` is set, an event otherwise.
#[derive(Debug, Deserialize)]
pub struct CdpMessage {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<RemoteError>,
    pub method: Option<String>,
}

impl CdpMessage {
    /// Split a reply into its request id and outcome. Events yield `None`.
    pub fn into_reply(self) -> Option<(u64, Result<Value, CdpError>)> {
        let id = self.id?;
        let outcome = match self.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        };
        Some((id, outcome))
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
}

/// Target created through `PUT /json/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetInfo {
    pub id: String,
    #[serde(default)]
    pub url: String,
}

/// `GET /json/version`. Chrome mixes key styles here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version", default)]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    None,
    Left,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MousePressed,
    MouseReleased,
    MouseMoved,
}

/// `Page.captureScreenshot` encoding. Form snapshots are PNG, recorder
/// frames JPEG.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotFormat {
    Jpeg,
    Png,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;

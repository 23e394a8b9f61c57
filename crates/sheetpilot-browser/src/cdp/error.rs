//! CDP error types.

use thiserror::Error;

use sheetpilot_protocols::DriverError;

/// CDP client errors.
#[derive(Debug, Error)]
pub enum CdpError {
    /// Failed to connect to Chrome.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Chrome not running with remote debugging at the endpoint.
    #[error("Chrome not available at {0}")]
    ChromeNotAvailable(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Error reply to a CDP command.
    #[error("CDP error: {message} (code: {code})")]
    Protocol { code: i64, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error (for endpoint discovery).
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element exists but is hidden or disabled.
    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    #[error("Option '{value}' not available in {element}")]
    OptionNotFound { element: String, value: String },

    /// JavaScript execution error.
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// A polled page condition did not hold in time.
    #[error("Timed out after {timeout_ms} ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    /// The browser sent no reply to a command.
    #[error("No reply to {method} within {timeout_ms} ms")]
    CommandTimeout { method: String, timeout_ms: u64 },

    #[error("Session closed")]
    SessionClosed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for CdpError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        CdpError::WebSocket(e.to_string())
    }
}

impl From<reqwest::Error> for CdpError {
    fn from(e: reqwest::Error) -> Self {
        CdpError::Http(e.to_string())
    }
}

impl From<url::ParseError> for CdpError {
    fn from(e: url::ParseError) -> Self {
        CdpError::ConnectionFailed(format!("Invalid URL: {}", e))
    }
}

impl From<CdpError> for DriverError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::ElementNotFound(id) => DriverError::ElementNotFound(id),
            CdpError::NotInteractable(id) => DriverError::NotInteractable(id),
            CdpError::OptionNotFound { element, value } => {
                DriverError::OptionNotFound { element, value }
            }
            // Scripts touching a node that is being re-rendered fail here;
            // the next attempt looks the node up again.
            CdpError::JavaScript(msg) => DriverError::NotInteractable(msg),
            CdpError::Timeout { what, timeout_ms } => DriverError::Timeout {
                target: what,
                timeout_ms,
            },
            CdpError::NavigationFailed(msg) => DriverError::Navigation(msg),
            CdpError::ConnectionFailed(msg)
            | CdpError::ChromeNotAvailable(msg)
            | CdpError::WebSocket(msg)
            | CdpError::Http(msg) => DriverError::SessionLost(msg),
            CdpError::SessionClosed => DriverError::SessionLost("CDP session closed".to_string()),
            e @ CdpError::CommandTimeout { .. } => DriverError::SessionLost(e.to_string()),
            e @ (CdpError::Protocol { .. }
            | CdpError::Serialization(_)
            | CdpError::InvalidResponse(_)) => DriverError::UnexpectedPage(e.to_string()),
        }
    }
}

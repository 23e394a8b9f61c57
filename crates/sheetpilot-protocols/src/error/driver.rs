//! Browser driver errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    #[error("Option '{value}' not available in {element}")]
    OptionNotFound { element: String, value: String },

    #[error("Timed out after {timeout_ms} ms waiting for {target}")]
    Timeout { target: String, timeout_ms: u64 },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Browser session lost: {0}")]
    SessionLost(String),

    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("Unexpected page state: {0}")]
    UnexpectedPage(String),

    #[error("Snapshot failed: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Whether a fresh attempt at the same element may succeed.
    ///
    /// Transient errors are absorbed by the field retry loop. Everything
    /// else ends the fill session.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DriverError::ElementNotFound(_)
                | DriverError::NotInteractable(_)
                | DriverError::OptionNotFound { .. }
                | DriverError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_errors_are_transient() {
        assert!(DriverError::ElementNotFound("projectId1".to_string()).is_transient());
        assert!(DriverError::NotInteractable("MonHours1".to_string()).is_transient());
        assert!(
            DriverError::OptionNotFound {
                element: "activityId1".to_string(),
                value: "99".to_string(),
            }
            .is_transient()
        );
        assert!(
            DriverError::Timeout {
                target: "applicationId2".to_string(),
                timeout_ms: 5000,
            }
            .is_transient()
        );
    }

    #[test]
    fn test_session_errors_are_fatal() {
        assert!(!DriverError::SessionLost("websocket closed".to_string()).is_transient());
        assert!(!DriverError::Navigation("net::ERR_CONNECTION_REFUSED".to_string()).is_transient());
        assert!(!DriverError::LaunchFailed("chrome missing".to_string()).is_transient());
        assert!(!DriverError::UnexpectedPage("no table".to_string()).is_transient());
    }

    #[test]
    fn test_timeout_display() {
        let err = DriverError::Timeout {
            target: "timesheetTable".to_string(),
            timeout_ms: 15000,
        };
        let display = err.to_string();
        assert!(display.contains("timesheetTable"));
        assert!(display.contains("15000"));
    }

    #[test]
    fn test_option_not_found_display() {
        let err = DriverError::OptionNotFound {
            element: "activityId3".to_string(),
            value: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Option '42' not available in activityId3");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = DriverError::from(io_err);
        assert!(err.to_string().contains("read-only"));
        assert!(!err.is_transient());
    }
}

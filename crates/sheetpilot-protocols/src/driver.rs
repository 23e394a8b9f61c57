//! Browser driver traits.
//!
//! The fill orchestrator only ever talks to these traits. Elements are
//! addressed by their DOM id and re-located on every call, so a caller
//! retrying a failed write always works against the live page.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;

/// One live browser session pointed at the timesheet form.
#[async_trait]
pub trait FormDriver: Send + Sync {
    /// Navigate to `url` and wait until `ready_element` exists.
    ///
    /// Returns the page title.
    async fn open(
        &self,
        url: &str,
        ready_element: &str,
        timeout: Duration,
    ) -> Result<String, DriverError>;

    /// Wait until an element with the given id exists.
    async fn wait_for_element(&self, element_id: &str, timeout: Duration)
    -> Result<(), DriverError>;

    /// Clear a visible text input and type `text` into it.
    async fn type_into(
        &self,
        element_id: &str,
        text: &str,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Choose the option whose value is `value` in a select element.
    async fn select_option(
        &self,
        element_id: &str,
        value: &str,
        timeout: Duration,
    ) -> Result<(), DriverError>;

    /// Click an element once it is visible.
    async fn click(&self, element_id: &str, timeout: Duration) -> Result<(), DriverError>;

    /// Write a PNG snapshot of the current page, replacing any file at `path`.
    async fn snapshot(&self, path: &Path) -> Result<(), DriverError>;

    /// Tear the session down. Safe to call more than once.
    async fn close(&self) -> Result<(), DriverError>;
}

/// Starts independent browser sessions, one per fill.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn FormDriver>, DriverError>;
}

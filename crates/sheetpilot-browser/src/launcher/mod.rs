//! Chrome process management.
//!
//! [`ChromeLauncher`] starts one Chrome per fill session, each on its own
//! free debugging port with a throwaway profile, or attaches to a running
//! Chrome when an endpoint is configured.

mod launcher_core;
mod launcher_types;

pub use launcher_core::ChromeLauncher;
pub(crate) use launcher_core::ChromeProcess;
pub use launcher_types::{BrowserError, LaunchOptions, RecordingOptions};

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;

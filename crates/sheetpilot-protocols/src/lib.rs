//! # SheetPilot Protocols
//!
//! Shared definitions for the SheetPilot workspace: the weekly timesheet
//! data model, the canonical row shape handed to the form filler, and the
//! traits behind which the external collaborators live.
//!
//! ## Collaborator Traits
//!
//! - [`TextGenerator`] - Text generation service used for extraction
//! - [`Transcriber`] - Speech-to-text service
//! - [`FormDriver`] - One live browser session pointed at the form
//! - [`BrowserLauncher`] - Factory for fresh [`FormDriver`] sessions

pub mod driver;
pub mod error;
pub mod intake;
pub mod timesheet;

pub use driver::{BrowserLauncher, FormDriver};
pub use error::{DriverError, ExtractError, TranscribeError};
pub use intake::{AudioClip, TextGenerator, Transcriber};
pub use timesheet::*;

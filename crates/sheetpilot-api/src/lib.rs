//! # SheetPilot API
//!
//! HTTP surface of the timesheet filler.
//!
//! ```text
//!   browser (recorder page)
//!        │  audio / JSON record
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │  axum router (CORS, request tracing)         │
//! │   /transcribe  /process_timesheet            │
//! │   /submit_timesheet  /normalize  /static/*   │
//! └──────┬──────────────┬──────────────┬─────────┘
//!        ▼              ▼              ▼
//!   Transcriber    TextGenerator   spawn_fill ──► BrowserLauncher
//! ```
//!
//! The collaborators live behind the protocol traits in [`AppState`], so
//! the router can be exercised without a speech service, a model server
//! or a browser.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;

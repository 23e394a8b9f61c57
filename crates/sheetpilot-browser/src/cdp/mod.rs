//! Chrome DevTools Protocol (CDP) client.
//!
//! Talks to Chrome over its debugging WebSocket using the CDP JSON-RPC
//! protocol. Only the domains the form driver needs are wrapped.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page(None).await?;
//! page.navigate("http://127.0.0.1:5500/templates/timesheet.html").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::{ElementState, PageSession};

//! Browser automation for SheetPilot.
//!
//! Implements [`FormDriver`](sheetpilot_protocols::FormDriver) over the
//! Chrome DevTools Protocol. Pure Rust, no WebDriver binary needed.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │ CdpFormDriver   │ ◄──────────────► │   Chrome         │
//! │ (this crate)    │       CDP        │  (timesheet form)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! Each fill gets its own Chrome process, started by [`ChromeLauncher`] on
//! a free debugging port with a throwaway profile. Set `browser.endpoint`
//! to attach to an already running Chrome instead:
//!
//! ```bash
//! google-chrome --remote-debugging-port=9222
//! ```
//!
//! Elements are always addressed by DOM id and looked up again on every
//! call, so a retried write never works against a stale node.

pub mod cdp;
mod driver;
pub mod launcher;
mod recorder;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use driver::CdpFormDriver;
pub use launcher::{BrowserError, ChromeLauncher, LaunchOptions};
pub use recorder::ScreenRecorder;

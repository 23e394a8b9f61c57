//! Fill session state machine.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use sheetpilot_protocols::DriverError;

/// Progress of one fill session.
///
/// ```text
/// NotStarted -> PageLoaded -> PreviewCaptured
///                          -> RowsFilling -> Completed
/// (any non-terminal)       -> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillState {
    NotStarted,
    PageLoaded,
    PreviewCaptured,
    RowsFilling,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Illegal fill state transition: {from} -> {to}")]
pub struct IllegalTransition {
    pub from: FillState,
    pub to: FillState,
}

impl From<IllegalTransition> for DriverError {
    fn from(err: IllegalTransition) -> Self {
        DriverError::UnexpectedPage(err.to_string())
    }
}

impl FillState {
    pub fn can_transition_to(self, next: FillState) -> bool {
        use FillState::*;
        matches!(
            (self, next),
            (NotStarted, PageLoaded)
                | (PageLoaded, PreviewCaptured)
                | (PageLoaded, RowsFilling)
                | (RowsFilling, Completed)
                | (NotStarted | PageLoaded | RowsFilling, Failed)
        )
    }

    /// Move to `next`, or reject the move.
    pub fn transition(self, next: FillState) -> Result<FillState, IllegalTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(IllegalTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FillState::PreviewCaptured | FillState::Completed | FillState::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FillState::NotStarted => "not_started",
            FillState::PageLoaded => "page_loaded",
            FillState::PreviewCaptured => "preview_captured",
            FillState::RowsFilling => "rows_filling",
            FillState::Completed => "completed",
            FillState::Failed => "failed",
        }
    }
}

impl fmt::Display for FillState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

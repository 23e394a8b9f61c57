//! Fill results.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use sheetpilot_protocols::DriverError;

use super::orchestrator::FillMode;
use super::state::FillState;

/// A field that could not be written after every retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    /// 1-based form row.
    pub row: usize,
    pub element_id: String,
    pub attempts: u32,
    pub message: String,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} not filled after {} attempts ({})",
            self.row, self.element_id, self.attempts, self.message
        )
    }
}

/// How a fill session ended.
#[derive(Debug)]
pub enum FillOutcome {
    /// Every field written. Carries the final snapshot.
    Success(PathBuf),
    /// Session finished but some fields were skipped.
    PartialFailure(PathBuf, Vec<FieldWarning>),
    /// Session aborted. Carries the error snapshot when one was taken.
    Fatal(DriverError, Option<PathBuf>),
}

impl FillOutcome {
    /// Short status label used in responses.
    pub fn status(&self) -> &'static str {
        match self {
            FillOutcome::Success(_) => "success",
            FillOutcome::PartialFailure(..) => "partial_failure",
            FillOutcome::Fatal(..) => "failed",
        }
    }

    /// The snapshot most relevant to this outcome.
    pub fn snapshot(&self) -> Option<&Path> {
        match self {
            FillOutcome::Success(path) | FillOutcome::PartialFailure(path, _) => Some(path),
            FillOutcome::Fatal(_, path) => path.as_deref(),
        }
    }

    pub fn warnings(&self) -> &[FieldWarning] {
        match self {
            FillOutcome::PartialFailure(_, warnings) => warnings,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&DriverError> {
        match self {
            FillOutcome::Fatal(error, _) => Some(error),
            _ => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, FillOutcome::Fatal(..))
    }
}

/// Everything known about a finished fill session.
#[derive(Debug)]
pub struct FillReport {
    pub mode: FillMode,
    pub state: FillState,
    /// Number of rows handed to the session.
    pub rows: usize,
    /// Title of the loaded form page.
    pub page_title: Option<String>,
    pub outcome: FillOutcome,
}

impl FillReport {
    /// A session that ended before a page was loaded.
    pub fn aborted(mode: FillMode, rows: usize, error: DriverError) -> Self {
        Self {
            mode,
            state: FillState::Failed,
            rows,
            page_title: None,
            outcome: FillOutcome::Fatal(error, None),
        }
    }
}

//! # SheetPilot Core
//!
//! Turns a weekly timesheet record into UI-ready rows and drives a
//! [`FormDriver`](sheetpilot_protocols::FormDriver) through the form.
//!
//! - [`hours`] - Hour value normalization to `"H:MM"`
//! - [`rows`] - Grouped and ungrouped row building
//! - [`retry`] - Field-level retry policy
//! - [`fill`] - Fill session state machine and orchestrator

pub mod fill;
pub mod hours;
pub mod retry;
pub mod rows;

pub use fill::{
    ArtifactPaths, FieldAction, FieldWarning, FieldWrite, FillMode, FillOrchestrator,
    FillOutcome, FillReport, FillState, FormTemplate, IllegalTransition, spawn_fill,
};
pub use hours::normalize_hours;
pub use retry::{RetryFailure, RetryPolicy};
pub use rows::{RowMode, build_grouped_rows, build_rows, build_ungrouped_rows, render_rows};

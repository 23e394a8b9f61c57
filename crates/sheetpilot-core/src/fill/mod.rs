//! Form filling.
//!
//! A fill opens the form, snapshots it, and in submit mode writes every
//! canonical row into the form's per-row fields before taking a final
//! snapshot. Progress is tracked by [`FillState`]; the result is a
//! [`FillReport`] carrying a [`FillOutcome`].

mod orchestrator;
mod outcome;
mod state;
mod template;

pub use orchestrator::{ArtifactPaths, FillMode, FillOrchestrator, spawn_fill};
pub use outcome::{FieldWarning, FillOutcome, FillReport};
pub use state::{FillState, IllegalTransition};
pub use template::{FieldAction, FieldWrite, FormTemplate};

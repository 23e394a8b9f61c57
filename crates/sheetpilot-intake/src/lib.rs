//! # SheetPilot Intake
//!
//! Everything upstream of row building: speech-to-text, the extraction
//! prompt, the local LLM client, and the tolerant parser that turns model
//! output into a [`WeeklyTimesheetRecord`].
//!
//! [`WeeklyTimesheetRecord`]: sheetpilot_protocols::WeeklyTimesheetRecord

mod activity;
mod extract;
mod ollama;
mod parser;
mod prompt;
mod speech;

pub use activity::{ACTIVITIES, Activity, DEFAULT_ACTIVITY, activity_name, resolve_activity};
pub use extract::{Extraction, extract_timesheet};
pub use ollama::OllamaGenerator;
pub use parser::parse_timesheet_response;
pub use prompt::build_prompt;
pub use speech::HttpTranscriber;

//! Free text to weekly record.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use sheetpilot_core::{RowMode, build_rows, render_rows};
use sheetpilot_protocols::{CanonicalRow, ExtractError, TextGenerator, WeeklyTimesheetRecord};

use crate::activity::resolve_activity;
use crate::parser::parse_timesheet_response;
use crate::prompt::build_prompt;

/// Result of one extraction: the record, its rows and a readable preview.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub record: WeeklyTimesheetRecord,
    pub rows: Vec<CanonicalRow>,
    pub preview: String,
}

/// Ask `generator` to turn `text` into a weekly record.
///
/// Activity names the model returned instead of codes are mapped back to
/// their codes; unknown values pass through untouched.
pub async fn extract_timesheet(
    generator: &dyn TextGenerator,
    text: &str,
    now: NaiveDateTime,
    mode: RowMode,
) -> Result<Extraction, ExtractError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let prompt = build_prompt(text, now);
    debug!(model = generator.model(), chars = prompt.len(), "Built extraction prompt");

    let raw = generator.generate(&prompt).await?;
    let mut record = match parse_timesheet_response(&raw) {
        Ok(record) => record,
        Err(e) => {
            warn!("Model output is not a timesheet: {}", e);
            return Err(e);
        }
    };
    resolve_activities(&mut record);

    let rows = build_rows(&record, mode);
    let preview = render_rows(&rows);
    info!(
        items = record.item_count(),
        absences = record.absences.len(),
        rows = rows.len(),
        "Timesheet extracted"
    );

    Ok(Extraction {
        record,
        rows,
        preview,
    })
}

fn resolve_activities(record: &mut WeeklyTimesheetRecord) {
    for day in sheetpilot_protocols::Weekday::ALL {
        for item in record.bucket_mut(day) {
            if let Some(code) = resolve_activity(&item.activity) {
                if code != item.activity {
                    debug!("Mapped activity '{}' to code {}", item.activity, code);
                    item.activity = code.to_string();
                }
            }
        }
    }
}

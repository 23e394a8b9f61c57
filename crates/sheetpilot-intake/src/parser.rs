//! Tolerant parsing of model output.
//!
//! Local models rarely return bare JSON: answers come wrapped in Markdown
//! fences, preceded by chatter, or with JavaScript-style trailing commas
//! copied from the prompt example. The parser peels those layers off
//! before handing the object to serde.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use sheetpilot_protocols::{ExtractError, WeeklyTimesheetRecord};

/// Parse a raw model answer into a record.
pub fn parse_timesheet_response(raw: &str) -> Result<WeeklyTimesheetRecord, ExtractError> {
    let malformed = |reason: String| ExtractError::MalformedResponse {
        reason,
        raw: raw.to_string(),
    };

    let body = strip_code_fence(raw);
    let object = outermost_object(body)
        .ok_or_else(|| malformed("no JSON object in response".to_string()))?;
    let cleaned = remove_trailing_commas(object);

    if cleaned.len() != object.len() {
        debug!("Removed trailing commas from model output");
    }

    serde_json::from_str(&cleaned).map_err(|e| malformed(e.to_string()))
}

/// Return the content of the first fenced block, or the input unchanged.
fn strip_code_fence(raw: &str) -> &str {
    let Some(start) = raw.find("```") else {
        return raw;
    };
    let after = &raw[start + 3..];
    // Skip an info string such as `json`.
    let body = match after.find('\n') {
        Some(newline) => &after[newline + 1..],
        None => after,
    };
    match body.find("```") {
        Some(end) => &body[..end],
        None => body,
    }
}

/// Slice from the first `{` to the last `}`.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn remove_trailing_commas(text: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| Regex::new(r",(\s*[}\]])").expect("trailing comma pattern is a valid regex"));
    re.replace_all(text, "$1").into_owned()
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

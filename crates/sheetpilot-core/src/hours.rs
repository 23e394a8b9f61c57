//! Hour value normalization.

use sheetpilot_protocols::HoursValue;

/// Convert an hour value into the form's `"H:MM"` text.
///
/// Numbers are truncated toward zero. A string of ASCII digits is read as
/// a whole number of hours; any other string is only trimmed, so values
/// such as `"7:30"` reach the form unchanged. No range checks are applied.
///
/// The digit check runs before trimming, so a padded string like `" 8 "`
/// is written as `"8"`, not `"8:00"`.
pub fn normalize_hours(value: &HoursValue) -> String {
    match value {
        HoursValue::Integer(n) => format!("{}:00", n),
        HoursValue::Float(f) => normalize_float(*f),
        HoursValue::Text(text) => normalize_text(text),
    }
}

fn normalize_float(value: f64) -> String {
    if !value.is_finite() {
        return "0:00".to_string();
    }
    let whole = value.trunc();
    // -0.0 would print as "-0"
    let whole = if whole == 0.0 { 0.0 } else { whole };
    format!("{:.0}:00", whole)
}

fn normalize_text(text: &str) -> String {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        // Strip leading zeros textually so arbitrarily long digit runs
        // never overflow.
        let digits = text.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };
        format!("{}:00", digits)
    } else {
        text.trim().to_string()
    }
}

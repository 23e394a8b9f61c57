//! Activity catalog of the timesheet form.
//!
//! The activity dropdown carries numeric option values; the model is asked
//! to answer with those codes, but frequently echoes the display name
//! instead, so both directions are available here.

/// One dropdown option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub name: &'static str,
    pub code: &'static str,
}

const fn activity(name: &'static str, code: &'static str) -> Activity {
    Activity { name, code }
}

/// All activities in dropdown order.
pub const ACTIVITIES: [Activity; 17] = [
    activity("Planning, Tracking & Mgmt", "1"),
    activity("Requirements Definition & General Design", "2"),
    activity("Detailed Design", "3"),
    activity("Build", "4"),
    activity("Functionality Testing & Install - Excludes UAT", "5"),
    activity("Data Conversion, Data Migration & Table Entry", "6"),
    activity("Application Maintenance Support", "7"),
    activity("Infrastructure Maintenance Support", "8"),
    activity("End User Maintenance Support", "9"),
    activity("Implementation - Purchased Hardware", "10"),
    activity("Application Production Support", "11"),
    activity("Infrastructure Production Support", "12"),
    activity("End User Production Support", "13"),
    activity("Administration", "14"),
    activity("Training Conference", "15"),
    activity("Travel", "16"),
    activity("Employee Down Time", "17"),
];

/// Activity used when nothing in the instruction matches.
pub const DEFAULT_ACTIVITY: &str = "Training Conference";

/// Display name for a code, e.g. `"4"` -> `"Build"`.
pub fn activity_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    ACTIVITIES.iter().find(|a| a.code == code).map(|a| a.name)
}

/// Map a model-supplied activity to its dropdown code.
///
/// Accepts a code as-is or a display name (case-insensitive). Anything
/// else yields `None` and is left for the caller to pass through.
pub fn resolve_activity(value: &str) -> Option<&'static str> {
    let value = value.trim();
    ACTIVITIES
        .iter()
        .find(|a| a.code == value || a.name.eq_ignore_ascii_case(value))
        .map(|a| a.code)
}

//! Row building: weekly record to ordered canonical rows.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use sheetpilot_protocols::{CanonicalRow, RowKey, WeeklyTimesheetRecord};

use crate::hours::normalize_hours;

/// How work items become rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMode {
    /// One row per (application, project, activity), hours spread across days.
    #[default]
    Grouped,
    /// One row per work item.
    Ungrouped,
}

impl RowMode {
    pub fn from_group_flag(group: bool) -> Self {
        if group {
            RowMode::Grouped
        } else {
            RowMode::Ungrouped
        }
    }
}

/// Build rows from a record with the given policy.
///
/// Absence entries never produce rows. The record is not modified, so
/// building twice yields equal output.
pub fn build_rows(record: &WeeklyTimesheetRecord, mode: RowMode) -> Vec<CanonicalRow> {
    match mode {
        RowMode::Grouped => build_grouped_rows(record),
        RowMode::Ungrouped => build_ungrouped_rows(record),
    }
}

/// Merge items sharing an identity key into one row.
///
/// Rows appear in first-seen order scanning Monday to Friday. A later
/// item for the same key and weekday overwrites the slot.
pub fn build_grouped_rows(record: &WeeklyTimesheetRecord) -> Vec<CanonicalRow> {
    let mut rows: Vec<CanonicalRow> = Vec::new();
    let mut positions: HashMap<RowKey, usize> = HashMap::new();

    for (day, items) in record.days() {
        for item in items {
            let key = RowKey::new(&record.application_code, &item.project, &item.activity);
            let position = match positions.get(&key) {
                Some(&position) => position,
                None => {
                    rows.push(CanonicalRow::new(key.clone()));
                    positions.insert(key, rows.len() - 1);
                    rows.len() - 1
                }
            };
            rows[position]
                .hours
                .set(day.slot(), normalize_hours(&item.hours));
        }
    }

    rows
}

/// One row per work item, each with a single populated slot.
pub fn build_ungrouped_rows(record: &WeeklyTimesheetRecord) -> Vec<CanonicalRow> {
    record
        .days()
        .flat_map(|(day, items)| {
            items.iter().map(move |item| {
                let key = RowKey::new(&record.application_code, &item.project, &item.activity);
                CanonicalRow::new(key).with_hours(day.slot(), normalize_hours(&item.hours))
            })
        })
        .collect()
}

/// Human-readable listing of rows, one line each.
///
/// `Row 1: 100 | TR#76891 | activity 4 | Mon 8:00, Wed 4:00`
pub fn render_rows(rows: &[CanonicalRow]) -> String {
    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        let hours: Vec<String> = row
            .hours
            .iter()
            .map(|(slot, value)| format!("{} {}", slot.weekday().short_name(), value))
            .collect();
        let activity = if row.activity.is_empty() { "-" } else { &row.activity };
        let _ = writeln!(
            out,
            "Row {}: {} | {} | activity {} | {}",
            index + 1,
            row.application,
            row.project,
            activity,
            if hours.is_empty() { "no hours".to_string() } else { hours.join(", ") },
        );
    }
    out
}

#[cfg(test)]
#[path = "rows_tests.rs"]
mod tests;

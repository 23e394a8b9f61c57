//! Canonical, UI-ready timesheet rows.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::Weekday;

/// Hour field of the form, one per working day.
///
/// Ordering follows the week, so maps keyed by slot iterate Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DaySlot {
    MonHours,
    TueHours,
    WedHours,
    ThuHours,
    FriHours,
}

impl DaySlot {
    pub const ALL: [DaySlot; 5] = [
        DaySlot::MonHours,
        DaySlot::TueHours,
        DaySlot::WedHours,
        DaySlot::ThuHours,
        DaySlot::FriHours,
    ];

    /// Base element id of the slot, e.g. `"MonHours"`.
    pub fn id(self) -> &'static str {
        match self {
            DaySlot::MonHours => "MonHours",
            DaySlot::TueHours => "TueHours",
            DaySlot::WedHours => "WedHours",
            DaySlot::ThuHours => "ThuHours",
            DaySlot::FriHours => "FriHours",
        }
    }

    /// Element id of this slot on 1-based form row `row`.
    pub fn element_id(self, row: usize) -> String {
        format!("{}{}", self.id(), row)
    }

    pub fn weekday(self) -> Weekday {
        match self {
            DaySlot::MonHours => Weekday::Monday,
            DaySlot::TueHours => Weekday::Tuesday,
            DaySlot::WedHours => Weekday::Wednesday,
            DaySlot::ThuHours => Weekday::Thursday,
            DaySlot::FriHours => Weekday::Friday,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Normalized hour strings for the five day slots.
///
/// Serialized as a JSON object holding only the populated slots, in
/// Monday to Friday order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<DaySlot, String>", into = "BTreeMap<DaySlot, String>")]
pub struct DayHours([Option<String>; 5]);

impl DayHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a slot, returning the value it replaced.
    pub fn set(&mut self, slot: DaySlot, value: impl Into<String>) -> Option<String> {
        self.0[slot.index()].replace(value.into())
    }

    pub fn get(&self, slot: DaySlot) -> Option<&str> {
        self.0[slot.index()].as_deref()
    }

    /// Populated slots in Monday to Friday order.
    pub fn iter(&self) -> impl Iterator<Item = (DaySlot, &str)> {
        DaySlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|value| (slot, value)))
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<BTreeMap<DaySlot, String>> for DayHours {
    fn from(map: BTreeMap<DaySlot, String>) -> Self {
        let mut hours = DayHours::new();
        for (slot, value) in map {
            hours.set(slot, value);
        }
        hours
    }
}

impl From<DayHours> for BTreeMap<DaySlot, String> {
    fn from(hours: DayHours) -> Self {
        DaySlot::ALL
            .into_iter()
            .zip(hours.0)
            .filter_map(|(slot, value)| value.map(|v| (slot, v)))
            .collect()
    }
}

/// Grouping identity of a row: application, project and activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub application: String,
    pub project: String,
    pub activity: String,
}

impl RowKey {
    /// Build a key, trimming every component.
    pub fn new(application: &str, project: &str, activity: &str) -> Self {
        Self {
            application: application.trim().to_string(),
            project: project.trim().to_string(),
            activity: activity.trim().to_string(),
        }
    }
}

/// One finalized form row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub application: String,
    pub project: String,
    pub activity: String,
    pub hours: DayHours,
}

impl CanonicalRow {
    /// An empty-hours row for the given identity.
    pub fn new(key: RowKey) -> Self {
        Self {
            application: key.application,
            project: key.project,
            activity: key.activity,
            hours: DayHours::new(),
        }
    }

    pub fn key(&self) -> RowKey {
        RowKey::new(&self.application, &self.project, &self.activity)
    }

    pub fn with_hours(mut self, slot: DaySlot, value: impl Into<String>) -> Self {
        self.hours.set(slot, value);
        self
    }
}

#[cfg(test)]
#[path = "row_tests.rs"]
mod tests;

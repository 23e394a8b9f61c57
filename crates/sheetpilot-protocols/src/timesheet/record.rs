//! Weekly timesheet record as produced by extraction.

use serde::{Deserialize, Deserializer, Serialize};

use super::hours::HoursValue;
use super::row::DaySlot;

/// JSON key under which leave entries are listed.
pub const ABSENCE_KEY: &str = "NAW - VDSI Absence";

/// Working days covered by a timesheet, in fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Record key, e.g. `"monday"`.
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }

    /// Three letter name used in the `day` field, e.g. `"Mon"`.
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        }
    }

    /// Form hour slot this day writes into.
    pub fn slot(self) -> DaySlot {
        match self {
            Weekday::Monday => DaySlot::MonHours,
            Weekday::Tuesday => DaySlot::TueHours,
            Weekday::Wednesday => DaySlot::WedHours,
            Weekday::Thursday => DaySlot::ThuHours,
            Weekday::Friday => DaySlot::FriHours,
        }
    }
}

/// One block of work on one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub project: String,

    /// Numeric activity code, kept as a string ("1".."17").
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity: String,

    #[serde(default, deserialize_with = "lenient_hours")]
    pub hours: HoursValue,
}

impl WorkItem {
    pub fn new(
        project: impl Into<String>,
        activity: impl Into<String>,
        hours: impl Into<HoursValue>,
    ) -> Self {
        Self {
            date: None,
            day: None,
            project: project.into(),
            activity: activity.into(),
            hours: hours.into(),
        }
    }
}

/// A leave entry. Carries no project or activity and never becomes a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsenceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    #[serde(default, deserialize_with = "lenient_hours")]
    pub hours: HoursValue,
}

/// Weekly activity description for a single application code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTimesheetRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub application_code: String,

    #[serde(default, deserialize_with = "lenient_items")]
    pub monday: Vec<WorkItem>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub tuesday: Vec<WorkItem>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub wednesday: Vec<WorkItem>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub thursday: Vec<WorkItem>,

    #[serde(default, deserialize_with = "lenient_items")]
    pub friday: Vec<WorkItem>,

    #[serde(rename = "NAW - VDSI Absence", default, deserialize_with = "lenient_items")]
    pub absences: Vec<AbsenceEntry>,
}

impl WeeklyTimesheetRecord {
    pub fn new(application_code: impl Into<String>) -> Self {
        Self {
            application_code: application_code.into(),
            ..Default::default()
        }
    }

    /// Builder-style append to a weekday bucket.
    pub fn with_item(mut self, day: Weekday, item: WorkItem) -> Self {
        self.bucket_mut(day).push(item);
        self
    }

    pub fn bucket(&self, day: Weekday) -> &[WorkItem] {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
        }
    }

    pub fn bucket_mut(&mut self, day: Weekday) -> &mut Vec<WorkItem> {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        }
    }

    /// Weekday buckets in Monday to Friday order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[WorkItem])> {
        Weekday::ALL.into_iter().map(move |day| (day, self.bucket(day)))
    }

    /// Number of work items across all weekdays. Absences are not counted.
    pub fn item_count(&self) -> usize {
        self.days().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Accept strings, numbers, booleans and null where a string is expected.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Integer(n)) => n.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Flag(b)) => b.to_string(),
        None => String::new(),
    })
}

fn lenient_hours<'de, D>(deserializer: D) -> Result<HoursValue, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HoursValue>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;

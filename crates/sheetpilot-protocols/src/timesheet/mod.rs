//! Timesheet data model.
//!
//! [`WeeklyTimesheetRecord`] is the loosely shaped input coming out of
//! extraction; [`CanonicalRow`] is the strict, UI-ready output of row
//! building.

mod hours;
mod record;
mod row;

pub use hours::HoursValue;
pub use record::{AbsenceEntry, WeeklyTimesheetRecord, Weekday, WorkItem, ABSENCE_KEY};
pub use row::{CanonicalRow, DayHours, DaySlot, RowKey};

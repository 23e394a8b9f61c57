//! Row building over realistic extraction output.

use sheetpilot_core::{RowMode, build_rows};
use sheetpilot_protocols::{DaySlot, WeeklyTimesheetRecord};

const WEEK: &str = r#"{
    "application_code": "4471",
    "monday": [
        {"date": "2024-06-03", "day": "Monday", "project": "TR#76891", "activity": "4", "hours": 6},
        {"date": "2024-06-03", "day": "Monday", "project": "TR#80012", "activity": "11", "hours": 2}
    ],
    "tuesday": [
        {"date": "2024-06-04", "day": "Tuesday", "project": "TR#76891", "activity": "4", "hours": "8"}
    ],
    "wednesday": [],
    "thursday": [
        {"date": "2024-06-06", "day": "Thursday", "project": "TR#80012", "activity": "11", "hours": 4.0},
        {"date": "2024-06-06", "day": "Thursday", "project": "Onboarding", "activity": "15", "hours": null}
    ],
    "friday": null,
    "NAW - VDSI Absence": [
        {"date": "2024-06-07", "day": "Friday", "hours": 8}
    ]
}"#;

fn week() -> WeeklyTimesheetRecord {
    serde_json::from_str(WEEK).unwrap()
}

#[test]
fn grouped_week() {
    let rows = build_rows(&week(), RowMode::Grouped);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].project, "TR#76891");
    assert_eq!(rows[0].hours.get(DaySlot::MonHours), Some("6:00"));
    assert_eq!(rows[0].hours.get(DaySlot::TueHours), Some("8:00"));

    assert_eq!(rows[1].project, "TR#80012");
    assert_eq!(rows[1].activity, "11");
    assert_eq!(rows[1].hours.get(DaySlot::MonHours), Some("2:00"));
    assert_eq!(rows[1].hours.get(DaySlot::ThuHours), Some("4:00"));

    assert_eq!(rows[2].project, "Onboarding");
    assert_eq!(rows[2].hours.get(DaySlot::ThuHours), Some("0:00"));

    assert!(rows.iter().all(|row| row.hours.get(DaySlot::FriHours).is_none()));
}

#[test]
fn ungrouped_week() {
    let rows = build_rows(&week(), RowMode::Ungrouped);
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|row| row.hours.len() == 1));

    let order: Vec<(&str, DaySlot)> = rows
        .iter()
        .map(|row| (row.project.as_str(), row.hours.iter().next().unwrap().0))
        .collect();
    assert_eq!(
        order,
        [
            ("TR#76891", DaySlot::MonHours),
            ("TR#80012", DaySlot::MonHours),
            ("TR#76891", DaySlot::TueHours),
            ("TR#80012", DaySlot::ThuHours),
            ("Onboarding", DaySlot::ThuHours),
        ]
    );
}

#[test]
fn grouped_total_slots_never_exceed_items() {
    let record = week();
    let rows = build_rows(&record, RowMode::Grouped);
    let slots: usize = rows.iter().map(|row| row.hours.len()).sum();
    assert!(slots <= record.item_count());
}

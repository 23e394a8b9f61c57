use super::*;

#[test]
fn test_slot_element_id() {
    assert_eq!(DaySlot::MonHours.element_id(1), "MonHours1");
    assert_eq!(DaySlot::FriHours.element_id(12), "FriHours12");
}

#[test]
fn test_slot_weekday_round_trip() {
    for slot in DaySlot::ALL {
        assert_eq!(slot.weekday().slot(), slot);
    }
}

#[test]
fn test_day_hours_set_replaces() {
    let mut hours = DayHours::new();
    assert_eq!(hours.set(DaySlot::TueHours, "8:00"), None);
    assert_eq!(hours.set(DaySlot::TueHours, "4:00"), Some("8:00".to_string()));
    assert_eq!(hours.get(DaySlot::TueHours), Some("4:00"));
    assert_eq!(hours.len(), 1);
}

#[test]
fn test_day_hours_iter_in_week_order() {
    let mut hours = DayHours::new();
    hours.set(DaySlot::FriHours, "2:00");
    hours.set(DaySlot::MonHours, "8:00");
    hours.set(DaySlot::WedHours, "4:00");

    let slots: Vec<DaySlot> = hours.iter().map(|(slot, _)| slot).collect();
    assert_eq!(
        slots,
        vec![DaySlot::MonHours, DaySlot::WedHours, DaySlot::FriHours]
    );
}

#[test]
fn test_day_hours_serializes_populated_slots_only() {
    let mut hours = DayHours::new();
    hours.set(DaySlot::WedHours, "4:00");
    hours.set(DaySlot::MonHours, "8:00");

    let json = serde_json::to_string(&hours).unwrap();
    assert_eq!(json, r#"{"MonHours":"8:00","WedHours":"4:00"}"#);
}

#[test]
fn test_day_hours_rejects_unknown_slot() {
    let result: Result<DayHours, _> = serde_json::from_str(r#"{"SatHours":"8:00"}"#);
    assert!(result.is_err());
}

#[test]
fn test_canonical_row_shape() {
    let row = CanonicalRow::new(RowKey::new("100", "A", "4"))
        .with_hours(DaySlot::MonHours, "8:00")
        .with_hours(DaySlot::WedHours, "4:00");

    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "application": "100",
            "project": "A",
            "activity": "4",
            "hours": {"MonHours": "8:00", "WedHours": "4:00"}
        })
    );
}

#[test]
fn test_row_key_trims() {
    let key = RowKey::new(" 100 ", "  TR#1 Path ", " 4");
    assert_eq!(key.application, "100");
    assert_eq!(key.project, "TR#1 Path");
    assert_eq!(key.activity, "4");
}

#[test]
fn test_row_key_from_row() {
    let row = CanonicalRow::new(RowKey::new("1", "P", "7"));
    assert_eq!(row.key(), RowKey::new("1", "P", "7"));
}

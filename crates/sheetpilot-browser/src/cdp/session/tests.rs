use std::time::{Duration, Instant};

use super::dom::{
    center_script, commit_script, focus_and_clear_script, js_string, probe_wait, select_script,
    state_script,
};
use super::ElementState;

#[test]
fn test_js_string_escapes() {
    assert_eq!(js_string("projectId1"), "\"projectId1\"");
    assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
    assert_eq!(js_string("x</script>"), "\"x</script>\"");
}

#[test]
fn test_scripts_look_up_by_id() {
    for script in [
        state_script("MonHours3"),
        focus_and_clear_script("MonHours3"),
        commit_script("MonHours3"),
        center_script("MonHours3"),
    ] {
        assert!(script.contains("document.getElementById(\"MonHours3\")"));
        assert!(script.starts_with("(() => {"));
        assert!(script.ends_with("})()"));
    }
}

#[test]
fn test_select_script_quotes_value() {
    let script = select_script("activityId1", "4");
    assert!(script.contains("getElementById(\"activityId1\")"));
    assert!(script.contains("const value = \"4\";"));
    assert!(script.contains("\"no_option\""));
}

#[test]
fn test_element_state_deserialize() {
    let state: ElementState = serde_json::from_value(serde_json::json!("ready")).unwrap();
    assert_eq!(state, ElementState::Ready);
    let state: ElementState = serde_json::from_value(serde_json::json!("missing")).unwrap();
    assert_eq!(state, ElementState::Missing);
    assert!(serde_json::from_value::<ElementState>(serde_json::json!(null)).is_err());
}

#[test]
fn test_probe_wait_uses_remaining_window() {
    let start = Instant::now();
    let wait = probe_wait(start, Duration::from_secs(5));
    assert!(wait <= Duration::from_secs(5));
    assert!(wait > Duration::from_secs(4));

    assert_eq!(probe_wait(start, Duration::ZERO), Duration::from_millis(250));
}

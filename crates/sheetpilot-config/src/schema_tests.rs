use super::*;

#[test]
fn test_default_form_contract() {
    let form = FormConfig::default();
    assert_eq!(form.ready_element, "timesheetTable");
    assert_eq!(form.add_row_element, "addRowBtn");
    assert_eq!(form.element_timeout(), Duration::from_secs(5));
    assert_eq!(form.page_load_timeout(), Duration::from_secs(15));
    assert!(form.group_rows);
}

#[test]
fn test_default_retry() {
    let retry = RetryConfig::default();
    assert_eq!(retry.max_attempts, 3);
    assert_eq!(retry.delay_ms, 1000);
    assert_eq!(retry.backoff_multiplier, 1.0);
}

#[test]
fn test_artifact_paths() {
    let artifacts = ArtifactsConfig::default();
    assert_eq!(artifacts.before_path(), PathBuf::from("static/timesheet_before.png"));
    assert_eq!(artifacts.after_path(), PathBuf::from("static/timesheet_filled.png"));
    assert_eq!(artifacts.error_path(), PathBuf::from("static/error.png"));
}

#[test]
fn test_default_llm_points_at_local_ollama() {
    let llm = LlmConfig::default();
    assert_eq!(llm.base_url, "http://localhost:11434");
    assert_eq!(llm.model, "llama3");
    assert!(llm.temperature.is_none());
}

#[test]
fn test_browser_defaults() {
    let browser = BrowserConfig::default();
    assert!(browser.endpoint.is_none());
    assert!(!browser.headless);
    assert_eq!((browser.window_width, browser.window_height), (1400, 900));
}

#[test]
fn test_recording_interval() {
    let recording = RecordingConfig {
        enabled: true,
        interval_ms: 250,
        dir: "frames".to_string(),
    };
    assert_eq!(recording.interval(), Duration::from_millis(250));
}

#[test]
fn test_config_serialize_round_trip() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed.server.port, config.server.port);
    assert_eq!(parsed.form.url, config.form.url);
}

#[test]
fn test_partial_field_ids() {
    let form: FormConfig = toml::from_str("[fields]\nproject = \"projectCode\"").unwrap();
    assert_eq!(form.fields.project, "projectCode");
    assert_eq!(form.fields.application, "applicationId");
    assert_eq!(form.fields.activity, "activityId");
}

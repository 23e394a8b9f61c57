use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.server.port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "server.port"));
}

#[test]
fn test_validate_zero_attempts() {
    let mut config = Config::default();
    config.retry.max_attempts = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "retry.max_attempts"));
}

#[test]
fn test_validate_high_attempts_warning() {
    let mut config = Config::default();
    config.retry.max_attempts = 50;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "retry.max_attempts"));
}

#[test]
fn test_validate_shrinking_backoff() {
    let mut config = Config::default();
    config.retry.backoff_multiplier = 0.5;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "retry.backoff_multiplier"));
}

#[test]
fn test_validate_zero_timeouts() {
    let mut config = Config::default();
    config.form.element_timeout_secs = 0;
    config.form.page_load_timeout_secs = 0;

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_form_url_scheme() {
    let mut config = Config::default();
    config.form.url = "timesheet.html".to_string();
    assert!(!ConfigValidator::validate(&config).is_valid());

    config.form.url = "file:///srv/timesheet.html".to_string();
    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_empty_element_ids() {
    let mut config = Config::default();
    config.form.add_row_element = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "form.add_row_element"));
}

#[test]
fn test_validate_duplicate_snapshot_names() {
    let mut config = Config::default();
    config.artifacts.after = config.artifacts.before.clone();

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.message.contains("used twice")));
}

#[test]
fn test_validate_llm_base_url() {
    let mut config = Config::default();
    config.llm.base_url = "localhost:11434".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "llm.base_url"));
}

#[test]
fn test_validate_remote_speech_without_key_warns() {
    let mut config = Config::default();
    config.speech.url = "https://api.openai.com/v1/audio/transcriptions".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "speech.api_key"));
}

#[test]
fn test_validate_browser_endpoint() {
    let mut config = Config::default();
    config.browser.endpoint = Some("ws://localhost:9222".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
}

#[test]
fn test_validate_missing_chrome_path_warns() {
    let mut config = Config::default();
    config.browser.chrome_path = Some("/nonexistent/chrome-binary".to_string());

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "browser.chrome_path"));
}

#[test]
fn test_validate_recording_only_when_enabled() {
    let mut config = Config::default();
    config.recording.interval_ms = 0;
    assert!(ConfigValidator::validate(&config).is_valid());

    config.recording.enabled = true;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "recording.interval_ms"));
}

#[test]
fn test_validate_recording_inside_artifacts_warns() {
    let mut config = Config::default();
    config.recording.enabled = true;
    config.recording.dir = "static/frames".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.warnings.iter().any(|w| w.path == "recording.dir"));
}

#[test]
fn test_into_result() {
    let mut config = Config::default();
    assert!(ConfigValidator::validate(&config).into_result().is_ok());

    config.server.host = String::new();
    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

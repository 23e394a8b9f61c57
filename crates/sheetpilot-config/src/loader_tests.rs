use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_empty_config() {
    let config = ConfigLoader::load_str("").unwrap();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.retry.max_attempts, 3);
}

#[test]
fn test_load_basic_config() {
    let content = r#"
        [server]
        host = "0.0.0.0"
        port = 3000
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_load_full_config() {
    let content = r#"
        [form]
        url = "https://intranet.example.com/timesheet"
        ready_element = "sheet"
        group_rows = false

        [retry]
        max_attempts = 5
        delay_ms = 0

        [artifacts]
        dir = "/var/lib/sheetpilot"

        [browser]
        endpoint = "http://localhost:9222"
        headless = true

        [llm]
        model = "llama3.2:3b"
        temperature = 0.1

        [recording]
        enabled = true
        interval_ms = 1000
    "#;
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.form.url, "https://intranet.example.com/timesheet");
    assert_eq!(config.form.ready_element, "sheet");
    assert_eq!(config.form.add_row_element, "addRowBtn");
    assert!(!config.form.group_rows);
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.delay_ms, 0);
    assert_eq!(config.artifacts.before_path().to_str(), Some("/var/lib/sheetpilot/timesheet_before.png"));
    assert_eq!(config.browser.endpoint.as_deref(), Some("http://localhost:9222"));
    assert!(config.browser.headless);
    assert_eq!(config.llm.model, "llama3.2:3b");
    assert_eq!(config.llm.temperature, Some(0.1));
    assert!(config.recording.enabled);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[server]").unwrap();
    writeln!(file, "port = 5000").unwrap();

    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.server.port, 5000);
}

#[test]
fn test_load_nonexistent_file() {
    let result = ConfigLoader::load(Path::new("/nonexistent/path/sheetpilot.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_load_or_default_missing_file() {
    let config = ConfigLoader::load_or_default(Path::new("/nonexistent/sheetpilot.toml")).unwrap();
    assert_eq!(config.form.ready_element, "timesheetTable");
}

#[test]
fn test_load_invalid_toml() {
    let result = ConfigLoader::load_str("invalid = [unclosed");
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_expand_env_vars() {
    // SAFETY: This test runs in isolation and sets a unique test-only env var
    unsafe {
        std::env::set_var("SHEETPILOT_TEST_SPEECH_KEY", "sk-test");
    }
    let content = "[speech]\napi_key = \"${SHEETPILOT_TEST_SPEECH_KEY}\"";
    let config = ConfigLoader::load_str(content).unwrap();
    assert_eq!(config.speech.api_key.as_deref(), Some("sk-test"));
    unsafe {
        std::env::remove_var("SHEETPILOT_TEST_SPEECH_KEY");
    }
}

#[test]
fn test_expand_env_vars_not_set() {
    let content = "value = \"${NONEXISTENT_SHEETPILOT_VAR_12345}\"";
    let result = ConfigLoader::expand_env_vars(content);
    assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
}

#[test]
fn test_expand_env_vars_no_vars() {
    let content = "value = \"no variables here\"";
    let expanded = ConfigLoader::expand_env_vars(content).unwrap();
    assert_eq!(expanded, content);
}

#[test]
fn test_artifact_dir_tilde_expanded() {
    let config = ConfigLoader::load_str("[artifacts]\ndir = \"~/sheetpilot\"").unwrap();
    assert!(!config.artifacts.dir.starts_with('~'));
    assert!(config.artifacts.dir.ends_with("/sheetpilot"));
}

#[test]
fn test_expand_path_no_tilde() {
    let path = "/usr/local/bin";
    assert_eq!(ConfigLoader::expand_path(path), path);
}

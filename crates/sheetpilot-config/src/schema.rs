//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    #[serde(default)]
    pub recording: RecordingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// The timesheet form being filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_form_url")]
    pub url: String,

    /// Element whose presence marks the page as ready.
    #[serde(default = "default_ready_element")]
    pub ready_element: String,

    /// Element that appends a new row when clicked.
    #[serde(default = "default_add_row_element")]
    pub add_row_element: String,

    /// Id prefixes of the per-row fields; the 1-based row number is appended.
    #[serde(default)]
    pub fields: FieldIds,

    #[serde(default = "default_page_load_timeout")]
    pub page_load_timeout_secs: u64,

    /// Upper bound on each single element wait.
    #[serde(default = "default_element_timeout")]
    pub element_timeout_secs: u64,

    /// Merge repeated project/activity pairs into one row.
    #[serde(default = "default_group_rows")]
    pub group_rows: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            url: default_form_url(),
            ready_element: default_ready_element(),
            add_row_element: default_add_row_element(),
            fields: FieldIds::default(),
            page_load_timeout_secs: default_page_load_timeout(),
            element_timeout_secs: default_element_timeout(),
            group_rows: default_group_rows(),
        }
    }
}

impl FormConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }
}

/// Per-row element id prefixes of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIds {
    #[serde(default = "default_application_field")]
    pub application: String,

    #[serde(default = "default_project_field")]
    pub project: String,

    #[serde(default = "default_activity_field")]
    pub activity: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            application: default_application_field(),
            project: default_project_field(),
            activity: default_activity_field(),
        }
    }
}

fn default_application_field() -> String {
    "applicationId".to_string()
}

fn default_project_field() -> String {
    "projectId".to_string()
}

fn default_activity_field() -> String {
    "activityId".to_string()
}

fn default_form_url() -> String {
    "http://127.0.0.1:5500/templates/timesheet.html".to_string()
}

fn default_ready_element() -> String {
    "timesheetTable".to_string()
}

fn default_add_row_element() -> String {
    "addRowBtn".to_string()
}

fn default_page_load_timeout() -> u64 {
    15
}

fn default_element_timeout() -> u64 {
    5
}

fn default_group_rows() -> bool {
    true
}

/// Field write retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per field, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause after a failed attempt.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    1.0
}

fn default_max_delay_ms() -> u64 {
    10_000
}

/// Where diagnostic snapshots are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_artifacts_dir")]
    pub dir: String,

    #[serde(default = "default_before_name")]
    pub before: String,

    #[serde(default = "default_after_name")]
    pub after: String,

    #[serde(default = "default_error_name")]
    pub error: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            before: default_before_name(),
            after: default_after_name(),
            error: default_error_name(),
        }
    }
}

impl ArtifactsConfig {
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }

    pub fn before_path(&self) -> PathBuf {
        self.dir_path().join(&self.before)
    }

    pub fn after_path(&self) -> PathBuf {
        self.dir_path().join(&self.after)
    }

    pub fn error_path(&self) -> PathBuf {
        self.dir_path().join(&self.error)
    }
}

fn default_artifacts_dir() -> String {
    "static".to_string()
}

fn default_before_name() -> String {
    "timesheet_before.png".to_string()
}

fn default_after_name() -> String {
    "timesheet_filled.png".to_string()
}

fn default_error_name() -> String {
    "error.png".to_string()
}

/// Chrome launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Attach to an already running Chrome (e.g. `http://localhost:9222`)
    /// instead of launching one per fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Chrome executable. Auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<String>,

    #[serde(default)]
    pub headless: bool,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            chrome_path: None,
            headless: false,
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

fn default_window_width() -> u32 {
    1400
}

fn default_window_height() -> u32 {
    900
}

/// Text generation service used for extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
            temperature: None,
        }
    }
}

fn default_llm_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "llama3".to_string()
}

fn default_llm_timeout() -> u64 {
    180
}

/// Speech-to-text service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_url")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_speech_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            url: default_speech_url(),
            api_key: None,
            model: default_speech_model(),
            language: None,
            timeout_secs: default_speech_timeout(),
        }
    }
}

fn default_speech_url() -> String {
    "http://localhost:8080/v1/audio/transcriptions".to_string()
}

fn default_speech_model() -> String {
    "whisper-1".to_string()
}

fn default_speech_timeout() -> u64 {
    120
}

/// Diagnostic screen recording of fill sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_recording_interval")]
    pub interval_ms: u64,

    #[serde(default = "default_recording_dir")]
    pub dir: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: default_recording_interval(),
            dir: default_recording_dir(),
        }
    }
}

impl RecordingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_recording_interval() -> u64 {
    500
}

fn default_recording_dir() -> String {
    "recordings".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

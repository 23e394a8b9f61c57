//! Configuration validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_form(config, &mut result);
        Self::validate_retry(config, &mut result);
        Self::validate_artifacts(config, &mut result);
        Self::validate_services(config, &mut result);
        Self::validate_recording(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_form(config: &Config, result: &mut ValidationResult) {
        let form = &config.form;

        if !is_http_url(&form.url) && !form.url.starts_with("file://") {
            result.add_error(ValidationError::new(
                "form.url",
                "url must start with http://, https:// or file://",
            ));
        }

        for (path, value) in [
            ("form.ready_element", &form.ready_element),
            ("form.add_row_element", &form.add_row_element),
            ("form.fields.application", &form.fields.application),
            ("form.fields.project", &form.fields.project),
            ("form.fields.activity", &form.fields.activity),
        ] {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Element id cannot be empty"));
            }
        }

        if form.page_load_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "form.page_load_timeout_secs",
                "page_load_timeout_secs must be greater than 0",
            ));
        }

        if form.element_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "form.element_timeout_secs",
                "element_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_retry(config: &Config, result: &mut ValidationResult) {
        let retry = &config.retry;

        if retry.max_attempts == 0 {
            result.add_error(ValidationError::new(
                "retry.max_attempts",
                "max_attempts must be at least 1",
            ));
        }

        if retry.max_attempts > 10 {
            result.add_warning(ValidationWarning::new(
                "retry.max_attempts",
                "max_attempts is very high (>10), a missing field will stall the fill",
            ));
        }

        if !retry.backoff_multiplier.is_finite() || retry.backoff_multiplier < 1.0 {
            result.add_error(ValidationError::new(
                "retry.backoff_multiplier",
                "backoff_multiplier must be a finite number >= 1.0",
            ));
        }

        if retry.max_delay_ms < retry.delay_ms {
            result.add_warning(ValidationWarning::new(
                "retry.max_delay_ms",
                "max_delay_ms is below delay_ms, every pause will be capped",
            ));
        }
    }

    fn validate_artifacts(config: &Config, result: &mut ValidationResult) {
        let artifacts = &config.artifacts;

        if artifacts.dir.trim().is_empty() {
            result.add_error(ValidationError::new("artifacts.dir", "dir cannot be empty"));
        }

        let names = [&artifacts.before, &artifacts.after, &artifacts.error];
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "artifacts",
                    "Snapshot file names cannot be empty",
                ));
            }
            if names[..i].contains(name) {
                result.add_error(ValidationError::new(
                    "artifacts",
                    format!("Snapshot file name '{}' is used twice", name),
                ));
            }
        }
    }

    fn validate_services(config: &Config, result: &mut ValidationResult) {
        if !is_http_url(&config.llm.base_url) {
            result.add_error(ValidationError::new(
                "llm.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if config.llm.model.trim().is_empty() {
            result.add_error(ValidationError::new("llm.model", "Model cannot be empty"));
        }

        if !is_http_url(&config.speech.url) {
            result.add_error(ValidationError::new(
                "speech.url",
                "url must start with http:// or https://",
            ));
        }

        if config.speech.api_key.is_none() && config.speech.url.starts_with("https://") {
            result.add_warning(ValidationWarning::new(
                "speech.api_key",
                "API key is not set for a remote speech service",
            ));
        }

        if let Some(endpoint) = &config.browser.endpoint {
            if !is_http_url(endpoint) {
                result.add_error(ValidationError::new(
                    "browser.endpoint",
                    "endpoint must start with http:// or https://",
                ));
            }
        }

        if let Some(path) = &config.browser.chrome_path {
            if !Path::new(path).exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {}", path),
                ));
            }
        }
    }

    fn validate_recording(config: &Config, result: &mut ValidationResult) {
        let recording = &config.recording;
        if !recording.enabled {
            return;
        }

        if recording.interval_ms == 0 {
            result.add_error(ValidationError::new(
                "recording.interval_ms",
                "interval_ms must be greater than 0",
            ));
        }

        if Path::new(&recording.dir).starts_with(&config.artifacts.dir) {
            result.add_warning(ValidationWarning::new(
                "recording.dir",
                "Recording frames inside the artifacts directory are publicly served",
            ));
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

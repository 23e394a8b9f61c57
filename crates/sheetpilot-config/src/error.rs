//! Configuration errors.

use thiserror::Error;

/// Failure to load or accept a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// First validation error; `field` is the dotted key, e.g. `retry.max_attempts`.
    #[error("Invalid {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A `${VAR}` reference with no matching environment variable.
    #[error("Environment variable {0} is referenced but not set")]
    EnvVarNotSet(String),

    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

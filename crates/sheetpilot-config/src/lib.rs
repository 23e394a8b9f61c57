//! # SheetPilot Config
//!
//! TOML configuration for the SheetPilot service: loading with `${VAR}`
//! substitution, typed schema with defaults, and validation.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};

//! `check-config` subcommand.

use std::path::Path;

use sheetpilot_config::{ConfigLoader, ConfigValidator};

/// Print validation errors and warnings for the configuration file.
pub(crate) fn check_config(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !config_path.exists() {
        println!("{} not found; checking built-in defaults", config_path.display());
    }
    let config = ConfigLoader::load_or_default(config_path)?;
    let result = ConfigValidator::validate(&config);

    for error in &result.errors {
        println!("error:   {}: {}", error.path, error.message);
    }
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    if !result.is_valid() {
        return Err(format!("{} configuration error(s)", result.errors.len()).into());
    }
    println!("Configuration OK ({} warning(s))", result.warnings.len());
    Ok(())
}

//! One-shot timesheet subcommands: `normalize`, `extract` and `fill`.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use sheetpilot_browser::{ChromeLauncher, LaunchOptions};
use sheetpilot_config::Config;
use sheetpilot_core::{FillMode, FillOrchestrator, RowMode, build_rows, spawn_fill};
use sheetpilot_intake::{OllamaGenerator, extract_timesheet};
use sheetpilot_protocols::WeeklyTimesheetRecord;

use crate::load_config;

fn row_mode(config: &Config, ungrouped: bool) -> RowMode {
    if ungrouped {
        RowMode::Ungrouped
    } else {
        RowMode::from_group_flag(config.form.group_rows)
    }
}

fn read_record(file: &Path) -> Result<WeeklyTimesheetRecord, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Cannot read {}: {}", file.display(), e))?;
    let record = serde_json::from_str(&content)
        .map_err(|e| format!("{} is not a timesheet record: {}", file.display(), e))?;
    Ok(record)
}

/// Print the rows a record turns into.
pub(crate) fn normalize(
    config_path: &Path,
    file: &Path,
    ungrouped: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let record = read_record(file)?;
    let rows = build_rows(&record, row_mode(&config, ungrouped));
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Run extraction on `text` and print the record, rows and preview.
pub(crate) async fn extract(
    config_path: &Path,
    text: &str,
    ungrouped: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let generator = OllamaGenerator::from_config(&config.llm);
    let now = chrono::Local::now().naive_local();

    let extraction = extract_timesheet(&generator, text, now, row_mode(&config, ungrouped)).await?;
    println!("{}", serde_json::to_string_pretty(&extraction.record)?);
    println!();
    print!("{}", extraction.preview);
    Ok(())
}

/// Fill the form once and print the outcome.
pub(crate) async fn fill(
    config_path: &Path,
    file: &Path,
    preview: bool,
    ungrouped: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let record = read_record(file)?;
    let rows = build_rows(&record, row_mode(&config, ungrouped));
    info!(rows = rows.len(), "Filling timesheet from {}", file.display());

    let launcher = Arc::new(ChromeLauncher::new(LaunchOptions::from_config(&config)));
    let orchestrator = Arc::new(FillOrchestrator::from_config(&config));
    let report = spawn_fill(launcher, orchestrator, rows, FillMode::from_preview_flag(preview)).await;

    println!("Status: {}", report.outcome.status());
    println!("State:  {}", report.state);
    if let Some(title) = &report.page_title {
        println!("Page:   {}", title);
    }
    if let Some(path) = report.outcome.snapshot() {
        println!("Snapshot: {}", path.display());
    }
    for warning in report.outcome.warnings() {
        println!("Skipped: {}", warning);
    }

    if let Some(e) = report.outcome.error() {
        error!("Fill failed: {}", e);
        return Err(format!("fill failed: {}", e).into());
    }
    Ok(())
}

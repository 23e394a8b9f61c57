//! Fill orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use sheetpilot_config::{ArtifactsConfig, Config};
use sheetpilot_protocols::{BrowserLauncher, CanonicalRow, DriverError, FormDriver};

use super::outcome::{FieldWarning, FillOutcome, FillReport};
use super::state::FillState;
use super::template::{FieldAction, FieldWrite, FormTemplate};
use crate::retry::{RetryFailure, RetryPolicy};

/// What a session does once the form is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Snapshot the empty form and stop.
    Preview,
    /// Write every row, then snapshot the filled form.
    Submit,
}

impl FillMode {
    pub fn from_preview_flag(preview: bool) -> Self {
        if preview {
            FillMode::Preview
        } else {
            FillMode::Submit
        }
    }
}

/// Where session snapshots are written. Each run overwrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub before: PathBuf,
    pub after: PathBuf,
    pub error: PathBuf,
}

impl From<&ArtifactsConfig> for ArtifactPaths {
    fn from(config: &ArtifactsConfig) -> Self {
        Self {
            before: config.before_path(),
            after: config.after_path(),
            error: config.error_path(),
        }
    }
}

/// Drives one [`FormDriver`] session through the form.
#[derive(Debug, Clone)]
pub struct FillOrchestrator {
    template: FormTemplate,
    policy: RetryPolicy,
    artifacts: ArtifactPaths,
}

impl FillOrchestrator {
    pub fn new(template: FormTemplate, policy: RetryPolicy, artifacts: ArtifactPaths) -> Self {
        Self {
            template,
            policy,
            artifacts,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FormTemplate::from(&config.form),
            RetryPolicy::from(&config.retry),
            ArtifactPaths::from(&config.artifacts),
        )
    }

    pub fn template(&self) -> &FormTemplate {
        &self.template
    }

    pub fn artifacts(&self) -> &ArtifactPaths {
        &self.artifacts
    }

    /// Run a full session against an already launched driver.
    ///
    /// The driver is left open; closing it is the caller's job.
    pub async fn run(
        &self,
        driver: &dyn FormDriver,
        rows: &[CanonicalRow],
        mode: FillMode,
    ) -> FillReport {
        let mut session = Session {
            state: FillState::NotStarted,
            page_title: None,
            warnings: Vec::new(),
        };

        info!(rows = rows.len(), ?mode, url = %self.template.url, "Starting fill session");

        let outcome = match self.drive(driver, rows, mode, &mut session).await {
            Ok(snapshot) if session.warnings.is_empty() => FillOutcome::Success(snapshot),
            Ok(snapshot) => {
                let warnings = std::mem::take(&mut session.warnings);
                warn!(skipped = warnings.len(), "Fill completed with skipped fields");
                FillOutcome::PartialFailure(snapshot, warnings)
            }
            Err(e) => self.fail(driver, &mut session, e).await,
        };

        FillReport {
            mode,
            state: session.state,
            rows: rows.len(),
            page_title: session.page_title,
            outcome,
        }
    }

    async fn drive(
        &self,
        driver: &dyn FormDriver,
        rows: &[CanonicalRow],
        mode: FillMode,
        session: &mut Session,
    ) -> Result<PathBuf, DriverError> {
        let title = driver
            .open(
                &self.template.url,
                &self.template.ready_element,
                self.template.page_load_timeout,
            )
            .await?;
        info!(title = %title, "Form loaded");
        session.page_title = Some(title);
        session.advance(FillState::PageLoaded)?;

        self.capture(driver, &self.artifacts.before).await?;

        if mode == FillMode::Preview {
            session.advance(FillState::PreviewCaptured)?;
            return Ok(self.artifacts.before.clone());
        }

        session.advance(FillState::RowsFilling)?;
        for (offset, row) in rows.iter().enumerate() {
            let index = offset + 1;
            if index > 1 {
                self.add_row(driver, index).await?;
            }
            self.fill_row(driver, row, index, &mut session.warnings)
                .await?;
        }

        self.capture(driver, &self.artifacts.after).await?;
        session.advance(FillState::Completed)?;
        Ok(self.artifacts.after.clone())
    }

    /// Click the add-row trigger and wait for row `index` to appear.
    async fn add_row(&self, driver: &dyn FormDriver, index: usize) -> Result<(), DriverError> {
        let trigger = &self.template.add_row_element;
        let timeout = self.template.element_timeout;

        // Only the click is retried; a click that landed but whose row
        // never appeared must not add a second row.
        self.policy
            .run(trigger, move || driver.click(trigger, timeout))
            .await
            .map_err(|failure| match failure {
                RetryFailure::Exhausted { last, .. } => last,
                RetryFailure::Fatal(e) => e,
            })?;

        driver
            .wait_for_element(&self.template.application_id(index), timeout)
            .await?;
        debug!(row = index, "Row added");
        Ok(())
    }

    async fn fill_row(
        &self,
        driver: &dyn FormDriver,
        row: &CanonicalRow,
        index: usize,
        warnings: &mut Vec<FieldWarning>,
    ) -> Result<(), DriverError> {
        for write in &self.template.plan_row_writes(row, index) {
            match self
                .policy
                .run(&write.element_id, move || self.apply(driver, write))
                .await
            {
                Ok(()) => debug!(element = %write.element_id, "Field written"),
                Err(RetryFailure::Fatal(e)) => return Err(e),
                Err(RetryFailure::Exhausted { attempts, last }) => {
                    warn!(
                        row = index,
                        element = %write.element_id,
                        attempts,
                        error = %last,
                        "Giving up on field"
                    );
                    warnings.push(FieldWarning {
                        row: index,
                        element_id: write.element_id.clone(),
                        attempts,
                        message: last.to_string(),
                    });
                }
            }
        }
        info!(row = index, project = %row.project, "Row filled");
        Ok(())
    }

    async fn apply(&self, driver: &dyn FormDriver, write: &FieldWrite) -> Result<(), DriverError> {
        let timeout = self.template.element_timeout;
        match write.action {
            FieldAction::Type => driver.type_into(&write.element_id, &write.value, timeout).await,
            FieldAction::Select => {
                driver
                    .select_option(&write.element_id, &write.value, timeout)
                    .await
            }
        }
    }

    async fn capture(&self, driver: &dyn FormDriver, path: &Path) -> Result<(), DriverError> {
        driver.snapshot(path).await?;
        info!(path = %path.display(), "Snapshot saved");
        Ok(())
    }

    async fn fail(
        &self,
        driver: &dyn FormDriver,
        session: &mut Session,
        error: DriverError,
    ) -> FillOutcome {
        error!(state = %session.state, error = %error, "Fill session failed");

        let diagnostic = match driver.snapshot(&self.artifacts.error).await {
            Ok(()) => Some(self.artifacts.error.clone()),
            Err(e) => {
                warn!(error = %e, "Could not capture error snapshot");
                None
            }
        };

        if session.advance(FillState::Failed).is_err() {
            // Failure after a terminal state; record it anyway.
            session.state = FillState::Failed;
        }
        FillOutcome::Fatal(error, diagnostic)
    }
}

struct Session {
    state: FillState,
    page_title: Option<String>,
    warnings: Vec<FieldWarning>,
}

impl Session {
    fn advance(&mut self, next: FillState) -> Result<(), DriverError> {
        self.state = self.state.transition(next)?;
        debug!(state = %self.state, "Fill state changed");
        Ok(())
    }
}

/// Launch a browser and run one fill on its own task.
///
/// The driver is closed when the session ends, whatever the outcome.
pub async fn spawn_fill(
    launcher: Arc<dyn BrowserLauncher>,
    orchestrator: Arc<FillOrchestrator>,
    rows: Vec<CanonicalRow>,
    mode: FillMode,
) -> FillReport {
    let row_count = rows.len();
    let task = tokio::spawn(async move {
        let driver = match launcher.launch().await {
            Ok(driver) => driver,
            Err(e) => {
                error!(error = %e, "Browser launch failed");
                return FillReport::aborted(mode, rows.len(), e);
            }
        };

        let report = orchestrator.run(driver.as_ref(), &rows, mode).await;

        if let Err(e) = driver.close().await {
            warn!(error = %e, "Failed to close browser session");
        }
        report
    });

    match task.await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Fill task did not complete");
            FillReport::aborted(
                mode,
                row_count,
                DriverError::SessionLost(format!("fill task aborted: {}", e)),
            )
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

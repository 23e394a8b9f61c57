//! Request handlers.

use std::path::Path;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::response::{Html, IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use sheetpilot_core::{
    FieldWarning, FillMode, FillReport, FillState, RowMode, build_rows, render_rows, spawn_fill,
};
use sheetpilot_intake::extract_timesheet;
use sheetpilot_protocols::{AudioClip, CanonicalRow, WeeklyTimesheetRecord};

use crate::error::ApiError;
use crate::state::AppState;

/// URL prefix under which the artifact directory is served.
pub const STATIC_PREFIX: &str = "/static";

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Query flags shared by the fill endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct FillQuery {
    /// Only snapshot the loaded form, write nothing.
    #[serde(default)]
    pub preview: bool,
    /// Override `form.group_rows`.
    pub group: Option<bool>,
}

impl FillQuery {
    fn row_mode(&self, state: &AppState) -> RowMode {
        self.group
            .map(RowMode::from_group_flag)
            .unwrap_or_else(|| state.default_row_mode())
    }
}

/// Outcome of a fill session as returned to clients.
#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub status: &'static str,
    pub mode: FillMode,
    pub state: FillState,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub screenshot: Option<String>,
    pub warnings: Vec<FieldWarning>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub transcription: String,
    pub timesheet_data: WeeklyTimesheetRecord,
    pub normalized_rows: Vec<CanonicalRow>,
    pub preview_text: String,
    #[serde(flatten)]
    pub fill: FillResponse,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub rows: Vec<CanonicalRow>,
    pub preview_text: String,
}

/// Public URL of an artifact file.
pub fn artifact_url(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| format!("{}/{}", STATIC_PREFIX, name.to_string_lossy()))
}

/// Turn a finished session into a response, or an error for fatal ones.
fn fill_response(report: FillReport) -> Result<FillResponse, ApiError> {
    let screenshot = report.outcome.snapshot().and_then(artifact_url);

    if let Some(error) = report.outcome.error() {
        return Err(ApiError::FillFailed {
            message: error.to_string(),
            screenshot,
        });
    }

    Ok(FillResponse {
        status: report.outcome.status(),
        mode: report.mode,
        state: report.state,
        rows: report.rows,
        warnings: report.outcome.warnings().to_vec(),
        page_title: report.page_title,
        screenshot,
    })
}

async fn run_fill(
    state: &AppState,
    rows: Vec<CanonicalRow>,
    mode: FillMode,
) -> Result<FillResponse, ApiError> {
    let report = spawn_fill(
        state.launcher.clone(),
        state.orchestrator.clone(),
        rows,
        mode,
    )
    .await;
    fill_response(report)
}

async fn read_audio(mut multipart: Multipart) -> Result<AudioClip, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.wav").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Could not read upload: {}", e)))?;
        return Ok(AudioClip {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(ApiError::BadRequest(
        "Multipart field 'file' is required".to_string(),
    ))
}

/// `GET /` - the recorder page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.uptime().as_secs(),
        "model": state.generator.model(),
    }))
}

/// `POST /transcribe` - multipart `file` to `{"text"}`.
pub async fn transcribe(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let audio = read_audio(multipart).await?;
    let text = state.transcriber.transcribe(audio).await?;
    Ok(Json(json!({ "text": text })))
}

/// `POST /process_timesheet` - audio in, filled form out.
pub async fn process_timesheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FillQuery>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let audio = read_audio(multipart).await?;
    let transcription = state.transcriber.transcribe(audio).await?;
    info!(chars = transcription.len(), "Processing spoken timesheet");

    let now = chrono::Local::now().naive_local();
    let extraction = extract_timesheet(
        state.generator.as_ref(),
        &transcription,
        now,
        query.row_mode(&state),
    )
    .await?;

    let fill = run_fill(
        &state,
        extraction.rows.clone(),
        FillMode::from_preview_flag(query.preview),
    )
    .await?;

    Ok(Json(ProcessResponse {
        transcription,
        timesheet_data: extraction.record,
        normalized_rows: extraction.rows,
        preview_text: extraction.preview,
        fill,
    }))
}

/// `POST /submit_timesheet` - fill the form from an already extracted record.
pub async fn submit_timesheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FillQuery>,
    Json(record): Json<WeeklyTimesheetRecord>,
) -> Result<Json<FillResponse>, ApiError> {
    let rows = build_rows(&record, query.row_mode(&state));
    info!(rows = rows.len(), preview = query.preview, "Submitting timesheet");
    let fill = run_fill(&state, rows, FillMode::from_preview_flag(query.preview)).await?;
    Ok(Json(fill))
}

/// `POST /normalize` - rows only, no browser.
pub async fn normalize(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FillQuery>,
    Json(record): Json<WeeklyTimesheetRecord>,
) -> Json<NormalizeResponse> {
    let rows = build_rows(&record, query.row_mode(&state));
    let preview_text = render_rows(&rows);
    Json(NormalizeResponse { rows, preview_text })
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

//! HTTP route definitions.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::handlers::{self, STATIC_PREFIX};
use crate::state::AppState;

/// Upper bound for uploaded recordings.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the service router.
///
/// ```text
/// GET  /                  - Recorder page
/// GET  /health            - Liveness
/// POST /transcribe        - multipart `file` -> {"text"}
/// POST /process_timesheet - multipart `file` -> transcribe, extract, fill
/// POST /submit_timesheet  - JSON record -> fill
/// POST /normalize         - JSON record -> rows
/// GET  /static/*          - Snapshot artifacts
/// ```
///
/// The fill endpoints accept `?preview=true` and `?group=false`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let artifacts = ServeDir::new(&state.config.artifacts.dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/transcribe", post(handlers::transcribe))
        .route("/process_timesheet", post(handlers::process_timesheet))
        .route("/submit_timesheet", post(handlers::submit_timesheet))
        .route("/normalize", post(handlers::normalize))
        .nest_service(STATIC_PREFIX, artifacts)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

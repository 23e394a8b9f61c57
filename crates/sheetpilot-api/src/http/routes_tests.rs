use super::*;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use parking_lot::Mutex;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use sheetpilot_config::Config;
use sheetpilot_protocols::{
    AudioClip, BrowserLauncher, DriverError, ExtractError, FormDriver, TextGenerator,
    TranscribeError, Transcriber,
};

const RECORD: &str = r#"{
    "application_code": "100",
    "monday": [{ "project": "A", "activity": "4", "hours": 8 }],
    "wednesday": [{ "project": "A", "activity": "4", "hours": "4" }]
}"#;

type Writes = Arc<Mutex<Vec<(String, String)>>>;

struct StubTranscriber;

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(&self, audio: AudioClip) -> Result<String, TranscribeError> {
        if audio.is_empty() {
            return Err(TranscribeError::EmptyAudio);
        }
        Ok("application code 100 Monday A 8 hours build".to_string())
    }
}

struct StubGenerator;

#[async_trait]
impl TextGenerator for StubGenerator {
    fn model(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ExtractError> {
        Ok(format!("```json\n{RECORD}\n```"))
    }
}

/// A form that accepts every write and saves placeholder snapshots.
struct StubDriver {
    fail_open: bool,
    writes: Writes,
}

#[async_trait]
impl FormDriver for StubDriver {
    async fn open(&self, _url: &str, ready: &str, _t: Duration) -> Result<String, DriverError> {
        if self.fail_open {
            return Err(DriverError::Navigation(format!("{ready} never appeared")));
        }
        Ok("Timesheet".to_string())
    }

    async fn wait_for_element(&self, _id: &str, _t: Duration) -> Result<(), DriverError> {
        Ok(())
    }

    async fn type_into(&self, id: &str, text: &str, _t: Duration) -> Result<(), DriverError> {
        self.writes.lock().push((id.to_string(), text.to_string()));
        Ok(())
    }

    async fn select_option(&self, id: &str, value: &str, _t: Duration) -> Result<(), DriverError> {
        self.writes.lock().push((id.to_string(), value.to_string()));
        Ok(())
    }

    async fn click(&self, _id: &str, _t: Duration) -> Result<(), DriverError> {
        Ok(())
    }

    async fn snapshot(&self, path: &Path) -> Result<(), DriverError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, b"\x89PNG")?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

struct StubLauncher {
    fail_open: bool,
    writes: Writes,
}

#[async_trait]
impl BrowserLauncher for StubLauncher {
    async fn launch(&self) -> Result<Box<dyn FormDriver>, DriverError> {
        Ok(Box::new(StubDriver {
            fail_open: self.fail_open,
            writes: self.writes.clone(),
        }))
    }
}

struct Harness {
    router: Router,
    writes: Writes,
    _dir: TempDir,
}

fn harness(fail_open: bool) -> Harness {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.artifacts.dir = dir.path().to_string_lossy().into_owned();
    config.retry.delay_ms = 0;

    let writes: Writes = Arc::new(Mutex::new(Vec::new()));
    let state = AppState::new(
        config,
        Arc::new(StubTranscriber),
        Arc::new(StubGenerator),
        Arc::new(StubLauncher {
            fail_open,
            writes: writes.clone(),
        }),
    );

    Harness {
        router: create_router(Arc::new(state)),
        writes,
        _dir: dir,
    }
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "sheetpilot-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"audio.wav\"\r\nContent-Type: audio/wav\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "stub");
}

#[tokio::test]
async fn test_index_page() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("/process_timesheet"));
}

#[tokio::test]
async fn test_normalize_grouped_by_default() {
    let h = harness(false);
    let response = h.router.oneshot(json_request("/normalize", RECORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["application"], "100");
    assert_eq!(rows[0]["hours"]["MonHours"], "8:00");
    assert_eq!(rows[0]["hours"]["WedHours"], "4:00");
    assert!(body["preview_text"].as_str().unwrap().starts_with("Row 1: 100 | A"));
}

#[tokio::test]
async fn test_normalize_ungrouped() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(json_request("/normalize?group=false", RECORD))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_submit_fills_form() {
    let h = harness(false);
    let response = h
        .router
        .clone()
        .oneshot(json_request("/submit_timesheet", RECORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["mode"], "submit");
    assert_eq!(body["state"], "completed");
    assert_eq!(body["screenshot"], "/static/timesheet_filled.png");
    assert!(body["warnings"].as_array().unwrap().is_empty());

    let writes = h.writes.lock().clone();
    assert!(writes.contains(&("applicationId1".to_string(), "100".to_string())));
    assert!(writes.contains(&("activityId1".to_string(), "4".to_string())));
    assert!(writes.contains(&("WedHours1".to_string(), "4:00".to_string())));

    let snapshot = h
        .router
        .oneshot(
            Request::builder()
                .uri("/static/timesheet_filled.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(snapshot.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_submit_preview_writes_nothing() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(json_request("/submit_timesheet?preview=true", RECORD))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["mode"], "preview");
    assert_eq!(body["state"], "preview_captured");
    assert_eq!(body["screenshot"], "/static/timesheet_before.png");
    assert!(h.writes.lock().is_empty());
}

#[tokio::test]
async fn test_fatal_fill_is_server_error() {
    let h = harness(true);
    let response = h
        .router
        .oneshot(json_request("/submit_timesheet", RECORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["status"], "failed");
    assert_eq!(body["screenshot"], "/static/error.png");
    assert!(body["error"].as_str().unwrap().contains("never appeared"));
}

#[tokio::test]
async fn test_transcribe() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(multipart_request("/transcribe", "file", b"RIFF0000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["text"].as_str().unwrap().starts_with("application code 100"));
}

#[tokio::test]
async fn test_transcribe_requires_file_field() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(multipart_request("/transcribe", "audio", b"RIFF0000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("'file'"));
}

#[tokio::test]
async fn test_transcribe_empty_upload() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(multipart_request("/transcribe", "file", b""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_timesheet_end_to_end() {
    let h = harness(false);
    let response = h
        .router
        .oneshot(multipart_request("/process_timesheet", "file", b"RIFF0000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["transcription"].as_str().unwrap().contains("Monday"));
    assert_eq!(body["timesheet_data"]["application_code"], "100");
    assert_eq!(body["normalized_rows"].as_array().unwrap().len(), 1);
    assert_eq!(body["status"], "success");
    assert_eq!(body["screenshot"], "/static/timesheet_filled.png");
}

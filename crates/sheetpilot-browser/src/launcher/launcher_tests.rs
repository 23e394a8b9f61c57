use std::path::{Path, PathBuf};
use std::time::Duration;

use sheetpilot_config::Config;
use sheetpilot_protocols::DriverError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::launcher_core::wait_for_endpoint;
use super::*;

#[test]
fn test_options_from_default_config() {
    let options = LaunchOptions::default();
    assert!(options.endpoint.is_none());
    assert!(options.chrome_path.is_none());
    assert!(!options.headless);
    assert_eq!((options.window_width, options.window_height), (1400, 900));
    assert!(options.recording.is_none());
}

#[test]
fn test_options_with_recording() {
    let mut config = Config::default();
    config.recording.enabled = true;
    config.recording.interval_ms = 250;
    config.browser.endpoint = Some("http://127.0.0.1:9222".to_string());

    let options = LaunchOptions::from_config(&config);
    assert_eq!(options.endpoint.as_deref(), Some("http://127.0.0.1:9222"));
    let recording = options.recording.unwrap();
    assert_eq!(recording.interval, Duration::from_millis(250));
    assert_eq!(recording.dir, PathBuf::from("recordings"));
}

#[test]
fn test_chrome_args() {
    let launcher = ChromeLauncher::new(LaunchOptions {
        headless: true,
        ..LaunchOptions::default()
    });
    let args = launcher.chrome_args(9333, Path::new("/tmp/profile"));

    assert!(args.contains(&"--remote-debugging-port=9333".to_string()));
    assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
    assert!(args.contains(&"--window-size=1400,900".to_string()));
    assert!(args.contains(&"--headless=new".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("about:blank"));
}

#[test]
fn test_chrome_args_headed() {
    let args = ChromeLauncher::default().chrome_args(9222, Path::new("/tmp/p"));
    assert!(!args.iter().any(|a| a.starts_with("--headless")));
}

#[test]
fn test_free_port() {
    let port = ChromeLauncher::free_port().unwrap();
    assert_ne!(port, 0);
}

#[test]
fn test_find_chrome() {
    if let Some(path) = ChromeLauncher::find_chrome() {
        assert!(path.exists());
    }
}

#[test]
fn test_browser_error_display() {
    assert_eq!(
        BrowserError::LaunchFailed("permission denied".to_string()).to_string(),
        "Failed to launch Chrome: permission denied"
    );
    let err = BrowserError::StartupTimeout {
        endpoint: "http://127.0.0.1:9333".to_string(),
        waited_ms: 10000,
    };
    assert!(err.to_string().contains("10000 ms"));
}

#[test]
fn test_browser_errors_become_launch_failures() {
    let err = DriverError::from(BrowserError::ChromeNotFound);
    assert!(matches!(err, DriverError::LaunchFailed(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_wait_for_endpoint_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/version"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(wait_for_endpoint(&server.uri(), 3).await.is_ok());
}

#[tokio::test]
async fn test_wait_for_endpoint_gives_up() {
    let server = MockServer::start().await;

    let result = wait_for_endpoint(&server.uri(), 2).await;
    assert!(matches!(
        result,
        Err(BrowserError::StartupTimeout { waited_ms: 400, .. })
    ));
}

#[tokio::test]
async fn test_attach_to_missing_endpoint_fails() {
    let server = MockServer::start().await;
    let launcher = ChromeLauncher::new(LaunchOptions {
        endpoint: Some(server.uri()),
        ..LaunchOptions::default()
    });

    let result = launcher.start().await;
    assert!(matches!(result, Err(BrowserError::Cdp(_))));
}

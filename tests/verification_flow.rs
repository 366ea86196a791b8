//! Verification flow integration tests
//!
//! Serves fixture pages from a local HTTP server and runs the full check
//! against a real headless Chromium. Browser-dependent tests are `#[ignore]`d
//! because they need a Chrome/Chromium install; run them with
//! `cargo test -- --ignored`.

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use smokecheck::{Config, RunReport, SmokecheckError, VerificationRunner};

/// Start screen once the app has initialized: enabled button, no picker.
const PAGE_READY: &str = r#"<!DOCTYPE html>
<html><head><title>Recorder</title></head>
<body>
  <button id="start" disabled>Start Recording</button>
  <script>
    setTimeout(() => document.getElementById('start').removeAttribute('disabled'), 300);
  </script>
</body></html>"#;

/// Regressed start screen: the background picker leaked back in.
const PAGE_WITH_PICKER: &str = r#"<!DOCTYPE html>
<html><head><title>Recorder</title></head>
<body>
  <button id="start" disabled>Start Recording</button>
  <div id="picker">Choose Background</div>
  <script>
    setTimeout(() => document.getElementById('start').removeAttribute('disabled'), 300);
  </script>
</body></html>"#;

/// Picker markup present but hidden; a user never sees it.
const PAGE_HIDDEN_PICKER: &str = r#"<!DOCTYPE html>
<html><head><title>Recorder</title></head>
<body>
  <button id="start">Start Recording</button>
  <div id="picker" style="display:none">Choose Background</div>
</body></html>"#;

/// Initialization never completes; the button stays disabled.
const PAGE_STUCK: &str = r#"<!DOCTYPE html>
<html><head><title>Recorder</title></head>
<body>
  <button id="start" disabled>Start Recording</button>
</body></html>"#;

/// Minimal HTTP server handing out one fixture page per path.
struct FixtureServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl FixtureServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fixture server");
        let addr = listener.local_addr().expect("fixture server addr");

        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let path = request
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or("/")
                        .to_string();

                    let body = match path.as_str() {
                        "/with-picker" => PAGE_WITH_PICKER,
                        "/hidden-picker" => PAGE_HIDDEN_PICKER,
                        "/stuck" => PAGE_STUCK,
                        _ => PAGE_READY,
                    };
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.addr.port(), path)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Config pointed at a fixture page, writing the screenshot into `dir`.
fn fixture_config(url: String, dir: &std::path::Path) -> (Config, PathBuf) {
    let screenshot = dir.join("verification/verification.png");
    let mut config = Config::default();
    config.set_url(url);
    config.browser.no_sandbox = true;
    config.artifact.path = screenshot.clone();
    config.checks.readiness_timeout_ms = 10_000;
    (config, screenshot)
}

/// Run the check, skipping the test when no browser is installed.
async fn try_run(config: Config) -> Option<Result<RunReport, SmokecheckError>> {
    match VerificationRunner::with_config(config).run().await {
        Err(SmokecheckError::Browser(msg)) => {
            eprintln!("Skipping test: {}", msg);
            None
        }
        other => Some(other),
    }
}

#[tokio::test]
async fn test_fixture_server_serves_pages() {
    let server = FixtureServer::start().await;

    let mut stream = tokio::net::TcpStream::connect(server.addr)
        .await
        .expect("connect");
    stream
        .write_all(b"GET /with-picker HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read");

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("Start Recording"));
    assert!(response.contains("Choose Background"));
}

#[tokio::test]
#[ignore] // Requires a Chrome/Chromium install
async fn test_passes_when_picker_absent() {
    let server = FixtureServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, screenshot) = fixture_config(server.url("/"), dir.path());

    let Some(result) = try_run(config).await else {
        return;
    };
    let report = result.expect("run should succeed");

    assert!(report.outcome.is_pass());
    assert!(screenshot.exists());
    assert!(std::fs::metadata(&screenshot).expect("metadata").len() > 0);
}

#[tokio::test]
#[ignore] // Requires a Chrome/Chromium install
async fn test_fails_when_picker_visible() {
    let server = FixtureServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, screenshot) = fixture_config(server.url("/with-picker"), dir.path());

    let Some(result) = try_run(config).await else {
        return;
    };
    let report = result.expect("a visible picker must not abort the run");

    // The mismatch degrades to the FAIL line; the screenshot still lands.
    assert!(!report.outcome.is_pass());
    assert!(screenshot.exists());
}

#[tokio::test]
#[ignore] // Requires a Chrome/Chromium install
async fn test_hidden_picker_counts_as_absent() {
    let server = FixtureServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, _screenshot) = fixture_config(server.url("/hidden-picker"), dir.path());

    let Some(result) = try_run(config).await else {
        return;
    };
    let report = result.expect("run should succeed");

    assert!(report.outcome.is_pass());
}

#[tokio::test]
#[ignore] // Requires a Chrome/Chromium install
async fn test_times_out_when_button_never_enables() {
    let server = FixtureServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (mut config, screenshot) = fixture_config(server.url("/stuck"), dir.path());
    config.checks.readiness_timeout_ms = 1_500;

    let Some(result) = try_run(config).await else {
        return;
    };
    let err = result.expect_err("the stuck page must time out");

    assert!(err.is_readiness_timeout());
    // The run aborts before the screenshot step.
    assert!(!screenshot.exists());
}

#[tokio::test]
#[ignore] // Requires a Chrome/Chromium install
async fn test_overwrites_screenshot_on_rerun() {
    let server = FixtureServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, screenshot) = fixture_config(server.url("/"), dir.path());

    let Some(first) = try_run(config.clone()).await else {
        return;
    };
    first.expect("first run should succeed");
    let first_len = std::fs::metadata(&screenshot).expect("metadata").len();

    try_run(config)
        .await
        .expect("browser was available a moment ago")
        .expect("second run should succeed");

    assert!(screenshot.exists());
    assert!(std::fs::metadata(&screenshot).expect("metadata").len() > 0);
    assert!(first_len > 0);

    // Exactly one artifact, overwritten in place; nothing versioned.
    let entries: Vec<_> = std::fs::read_dir(screenshot.parent().expect("parent"))
        .expect("read_dir")
        .collect();
    assert_eq!(entries.len(), 1);
}

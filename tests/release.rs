//! Latest-release download tests against a mocked GitHub.

mod common;

use common::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_release(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_release_downloads_first_asset() {
    let server = MockServer::start().await;
    let first = format!("{}/downloads/tool-linux.tar.gz", server.uri());
    let second = format!("{}/downloads/tool-windows.zip", server.uri());
    mount_release(
        &server,
        release_json(
            "v1.2.0",
            &[
                ("tool-linux.tar.gz", first.as_str()),
                ("tool-windows.zip", second.as_str()),
            ],
        ),
    )
    .await;

    let body = payload(30_000);
    Mock::given(method("GET"))
        .and(path("/downloads/tool-linux.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/downloads/tool-windows.zip"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let engine = engine_for(&server);
    let mut log = ProgressLog::default();
    let saved = engine.fetch_latest_release(
        "owner",
        "tool",
        dir.path(),
        Some(&mut |f: f64, m: &str| log.record(f, m)),
    );

    let saved = saved.expect("release should download");
    assert_eq!(saved, dir.path().join("tool-linux.tar.gz"));
    assert_eq!(std::fs::read(&saved).unwrap(), body);

    log.assert_in_range();
    let messages = log.messages();
    assert_eq!(messages[0], "Checking latest tool release...");
    assert!(messages.contains(&"Downloading tool-linux.tar.gz..."));
    assert_eq!(
        log.last(),
        &(1.0, "tool release downloaded successfully.".to_string())
    );

    // Several chunks of the body produce intermediate reports
    let chunk_reports = log
        .events
        .iter()
        .filter(|(f, m)| m == "Downloading tool-linux.tar.gz..." && *f > 0.1)
        .count();
    assert!(
        chunk_reports >= 2,
        "expected chunk reports, got {:?}",
        log.events
    );
}

#[tokio::test]
async fn test_release_overwrites_existing_file() {
    let server = MockServer::start().await;
    let url = format!("{}/downloads/tool.bin", server.uri());
    mount_release(&server, release_json("v2", &[("tool.bin", url.as_str())])).await;
    Mock::given(method("GET"))
        .and(path("/downloads/tool.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"new".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tool.bin"), b"old contents that are longer").unwrap();

    let saved = engine_for(&server)
        .fetch_latest_release("owner", "tool", dir.path(), None)
        .unwrap();
    assert_eq!(std::fs::read(saved).unwrap(), b"new");
}

#[tokio::test]
async fn test_release_empty_body_still_completes() {
    let server = MockServer::start().await;
    let url = format!("{}/downloads/empty.bin", server.uri());
    mount_release(&server, release_json("v0", &[("empty.bin", url.as_str())])).await;
    Mock::given(method("GET"))
        .and(path("/downloads/empty.bin"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut log = ProgressLog::default();
    let saved = engine_for(&server).fetch_latest_release(
        "owner",
        "tool",
        dir.path(),
        Some(&mut |f: f64, m: &str| log.record(f, m)),
    );

    let saved = saved.unwrap();
    assert_eq!(std::fs::metadata(saved).unwrap().len(), 0);
    assert_eq!(log.last().0, 1.0);
}

#[tokio::test]
async fn test_release_only_decodes_first_asset() {
    let server = MockServer::start().await;
    let url = format!("{}/downloads/a.bin", server.uri());
    let body = serde_json::json!({
        "tag_name": "v3",
        "assets": [
            {"name": "a.bin", "browser_download_url": url},
            {"name": "pending.bin"}
        ]
    });
    mount_release(&server, body).await;
    Mock::given(method("GET"))
        .and(path("/downloads/a.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let saved = engine_for(&server)
        .fetch_latest_release("owner", "tool", dir.path(), None)
        .expect("first asset is well formed");
    assert_eq!(saved, dir.path().join("a.bin"));
    assert_eq!(std::fs::read(saved).unwrap(), b"first");
}

#[tokio::test]
async fn test_release_without_content_length() {
    let server = MockServer::start().await;
    let body = payload(20_000);
    let asset_url = format!("{}/tool.bin", serve_chunked_once(body.clone()));
    mount_release(
        &server,
        release_json("v1", &[("tool.bin", asset_url.as_str())]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut log = ProgressLog::default();
    let saved = engine_for(&server).fetch_latest_release(
        "owner",
        "tool",
        dir.path(),
        Some(&mut |f: f64, m: &str| log.record(f, m)),
    );

    let saved = saved.expect("chunked download should succeed");
    assert_eq!(std::fs::read(saved).unwrap(), body);

    log.assert_in_range();
    let fractions: Vec<f64> = log.events.iter().map(|(f, _)| *f).collect();
    assert_eq!(fractions, vec![0.05, 0.1, 1.0]);
    assert_eq!(log.last().1, "tool release downloaded successfully.");
}

#[tokio::test]
async fn test_release_without_assets_fails() {
    let server = MockServer::start().await;
    mount_release(&server, serde_json::json!({"tag_name": "v1", "assets": []})).await;

    let dir = tempfile::tempdir().unwrap();
    let mut log = ProgressLog::default();
    let saved = engine_for(&server).fetch_latest_release(
        "owner",
        "tool",
        dir.path(),
        Some(&mut |f: f64, m: &str| log.record(f, m)),
    );

    assert!(saved.is_none());
    assert_eq!(
        log.last(),
        &(1.0, "Failed to download release: No release assets found.".to_string())
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_release_missing_assets_field_fails() {
    let server = MockServer::start().await;
    mount_release(&server, serde_json::json!({"tag_name": "v1"})).await;

    let dir = tempfile::tempdir().unwrap();
    let saved = engine_for(&server).fetch_latest_release("owner", "tool", dir.path(), None);
    assert!(saved.is_none());
}

#[tokio::test]
async fn test_release_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/owner/tool/releases/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut log = ProgressLog::default();
    let saved = engine_for(&server).fetch_latest_release(
        "owner",
        "tool",
        dir.path(),
        Some(&mut |f: f64, m: &str| log.record(f, m)),
    );

    assert!(saved.is_none());
    let (fraction, message) = log.last();
    assert_eq!(*fraction, 1.0);
    assert!(
        message.starts_with("Failed to download release:"),
        "{}",
        message
    );
    assert!(message.contains("404"), "{}", message);
}

#[tokio::test]
async fn test_release_asset_download_error() {
    let server = MockServer::start().await;
    let url = format!("{}/downloads/gone.zip", server.uri());
    mount_release(&server, release_json("v1", &[("gone.zip", url.as_str())])).await;
    Mock::given(method("GET"))
        .and(path("/downloads/gone.zip"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let saved = engine_for(&server).fetch_latest_release("owner", "tool", dir.path(), None);
    assert!(saved.is_none());
}

#[tokio::test]
async fn test_release_rejects_non_http_asset_url() {
    let server = MockServer::start().await;
    mount_release(
        &server,
        release_json("v1", &[("passwd", "file:///etc/passwd")]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let mut log = ProgressLog::default();
    let saved = engine_for(&server).fetch_latest_release(
        "owner",
        "tool",
        dir.path(),
        Some(&mut |f: f64, m: &str| log.record(f, m)),
    );

    assert!(saved.is_none());
    assert!(log.last().1.starts_with("Failed to download release:"));
}

#[tokio::test]
async fn test_release_sanitizes_asset_name() {
    let server = MockServer::start().await;
    let url = format!("{}/downloads/evil", server.uri());
    mount_release(
        &server,
        release_json("v1", &[("../../evil.sh", url.as_str())]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/downloads/evil"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"echo".to_vec()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let saved = engine_for(&server)
        .fetch_latest_release("owner", "tool", dir.path(), None)
        .unwrap();
    assert_eq!(saved.parent(), Some(dir.path()));
}

#[test]
fn test_release_unreachable_api() {
    let engine = repo_fetch::FetchEngine::new(
        repo_fetch::FetchConfig::default().with_api_base("http://127.0.0.1:9"),
    );
    let dir = tempfile::tempdir().unwrap();
    assert!(engine.fetch_latest_release("owner", "tool", dir.path(), None).is_none());
}

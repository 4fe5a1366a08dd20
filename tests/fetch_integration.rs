//! Integration tests for the fetch-and-extract procedure.
//!
//! These tests run the full procedure against a mock bucket.

mod support;

use std::path::Path;

use support::{build_tgz, mount_archive, mount_missing, state_archive};
use tempfile::TempDir;
use weather_fetch::{
    DownloadError, ExtractError, FetchError, FetchRequest, Fetcher, HttpClient, StateCode,
};
use wiremock::MockServer;

const PARQUET_PAYLOAD: &[u8] = b"PAR1\x15\x04\x15\x10columnar weather rows PAR1";

fn fetcher_for(server: &MockServer) -> Fetcher {
    Fetcher::new(HttpClient::new().expect("client"), &server.uri()).expect("fetcher")
}

async fn run_quiet(fetcher: &Fetcher, request: &FetchRequest) -> Result<String, FetchError> {
    let mut out = Vec::new();
    fetcher.run_with_output(request, &mut out).await?;
    Ok(String::from_utf8(out).expect("utf8 progress output"))
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read_dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_fetch_valid_state_produces_archive_and_artifact() {
    let server = MockServer::start().await;
    mount_archive(&server, "CA.tgz", state_archive("CA", PARQUET_PAYLOAD)).await;
    let temp_dir = TempDir::new().expect("temp dir");
    let data_dir = temp_dir.path().join("weather");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::CA, &data_dir);
    let mut out = Vec::new();
    let report = fetcher
        .run_with_output(&request, &mut out)
        .await
        .expect("fetch should succeed");

    let archive = data_dir.join("CA.tgz");
    let artifact = data_dir.join("CA.parquet");
    assert!(archive.exists(), "archive should be left in place");
    assert!(std::fs::metadata(&archive).unwrap().len() > 0);
    assert_eq!(std::fs::read(&artifact).unwrap(), PARQUET_PAYLOAD);

    assert_eq!(report.state, StateCode::CA);
    assert!(report.url.ends_with("/Weather/by_state_2/CA.tgz"));
    assert_eq!(report.archive.size_bytes, report.download.bytes_downloaded);
    assert_eq!(report.extracted, vec![artifact.clone()]);
    assert_eq!(report.artifact.apparent_bytes, PARQUET_PAYLOAD.len() as u64);
    assert!(report.artifact.kib() > 0);

    let progress = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = progress.lines().collect();
    assert_eq!(lines.len(), 3, "expected command, listing, usage: {progress}");
    assert!(lines[0].starts_with("GET "), "got: {}", lines[0]);
    assert!(lines[0].contains("/Weather/by_state_2/CA.tgz"));
    assert!(lines[1].contains("CA.tgz"), "got: {}", lines[1]);
    assert!(lines[2].ends_with("CA.parquet"), "got: {}", lines[2]);
}

#[tokio::test]
async fn test_fetch_missing_archive_is_not_found_and_skips_extraction() {
    let server = MockServer::start().await;
    mount_missing(&server, "NaN.tgz").await;
    let temp_dir = TempDir::new().expect("temp dir");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::NaN, temp_dir.path());
    let err = run_quiet(&fetcher, &request).await.unwrap_err();

    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
    assert!(matches!(
        err,
        FetchError::Download(DownloadError::HttpStatus { status: 404, .. })
    ));
    assert!(
        dir_entries(temp_dir.path()).is_empty(),
        "no archive or artifact should be written"
    );
}

#[tokio::test]
async fn test_fetch_unknown_state_fails_before_any_action() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");
    let data_dir = temp_dir.path().join("weather");

    let result = FetchRequest::for_code("ZZ", &data_dir);

    assert!(matches!(result, Err(FetchError::InvalidState(_))));
    assert!(!data_dir.exists(), "data dir must not be created");
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "no request should reach the server");
}

#[tokio::test]
async fn test_fetch_twice_is_idempotent() {
    let server = MockServer::start().await;
    mount_archive(&server, "NY.tgz", state_archive("NY", PARQUET_PAYLOAD)).await;
    let temp_dir = TempDir::new().expect("temp dir");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::NY, temp_dir.path());

    run_quiet(&fetcher, &request).await.expect("first run");
    let first_archive = std::fs::read(temp_dir.path().join("NY.tgz")).unwrap();
    run_quiet(&fetcher, &request).await.expect("second run");

    assert_eq!(dir_entries(temp_dir.path()), vec!["NY.parquet", "NY.tgz"]);
    assert_eq!(
        std::fs::read(temp_dir.path().join("NY.tgz")).unwrap(),
        first_archive
    );
    assert_eq!(
        std::fs::read(temp_dir.path().join("NY.parquet")).unwrap(),
        PARQUET_PAYLOAD
    );
}

#[tokio::test]
async fn test_fetch_replaces_stale_archive() {
    let server = MockServer::start().await;
    let body = state_archive("TX", PARQUET_PAYLOAD);
    mount_archive(&server, "TX.tgz", body.clone()).await;
    let temp_dir = TempDir::new().expect("temp dir");
    std::fs::write(temp_dir.path().join("TX.tgz"), b"stale partial download").unwrap();

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::TX, temp_dir.path());
    run_quiet(&fetcher, &request).await.expect("fetch");

    assert_eq!(std::fs::read(temp_dir.path().join("TX.tgz")).unwrap(), body);
}

#[tokio::test]
async fn test_fetch_leaves_working_directory_unchanged() {
    let server = MockServer::start().await;
    mount_archive(&server, "WA.tgz", state_archive("WA", PARQUET_PAYLOAD)).await;
    mount_missing(&server, "OR.tgz").await;
    let temp_dir = TempDir::new().expect("temp dir");
    let before = std::env::current_dir().expect("cwd");

    let fetcher = fetcher_for(&server);
    run_quiet(&fetcher, &FetchRequest::new(StateCode::WA, temp_dir.path()))
        .await
        .expect("success path");
    assert_eq!(std::env::current_dir().unwrap(), before);

    let _ = run_quiet(&fetcher, &FetchRequest::new(StateCode::OR, temp_dir.path())).await;
    assert_eq!(std::env::current_dir().unwrap(), before);
}

#[tokio::test]
async fn test_fetch_with_name_overrides() {
    let server = MockServer::start().await;
    let body = build_tgz(&[("florida.parquet", PARQUET_PAYLOAD)]);
    mount_archive(&server, "fl-2024.tgz", body).await;
    let temp_dir = TempDir::new().expect("temp dir");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::FL, temp_dir.path())
        .with_tarname("fl-2024.tgz")
        .unwrap()
        .with_parquet_name("florida.parquet")
        .unwrap();
    run_quiet(&fetcher, &request).await.expect("fetch");

    assert!(temp_dir.path().join("fl-2024.tgz").exists());
    assert!(temp_dir.path().join("florida.parquet").exists());
}

#[tokio::test]
async fn test_fetch_artifact_missing_from_archive() {
    let server = MockServer::start().await;
    let body = build_tgz(&[("readme.txt", b"wrong contents".as_slice())]);
    mount_archive(&server, "GA.tgz", body).await;
    let temp_dir = TempDir::new().expect("temp dir");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::GA, temp_dir.path());
    let err = run_quiet(&fetcher, &request).await.unwrap_err();

    match err {
        FetchError::ArtifactMissing { path, members } => {
            assert_eq!(path, temp_dir.path().join("GA.parquet"));
            assert_eq!(members, 1);
        }
        other => panic!("expected ArtifactMissing, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_corrupt_archive_is_typed_extract_error() {
    let server = MockServer::start().await;
    mount_archive(&server, "MT.tgz", b"this is not gzip data".to_vec()).await;
    let temp_dir = TempDir::new().expect("temp dir");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::MT, temp_dir.path());
    let err = run_quiet(&fetcher, &request).await.unwrap_err();

    assert!(
        matches!(err, FetchError::Extract(ExtractError::Corrupt { .. })),
        "expected corrupt archive, got: {err:?}"
    );
    assert!(!temp_dir.path().join("MT.parquet").exists());
}

#[tokio::test]
async fn test_fetch_server_error_propagates_status() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("temp dir");

    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::VT, temp_dir.path());
    let err = run_quiet(&fetcher, &request).await.unwrap_err();

    assert!(!err.is_not_found());
    assert!(matches!(
        err,
        FetchError::Download(DownloadError::HttpStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_fetch_extracts_archive_served_with_gzip_encoding() {
    let server = MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/Weather/by_state_2/CA.tgz"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(state_archive("CA", PARQUET_PAYLOAD)),
        )
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("temp dir");

    let fetcher = fetcher_for(&server);
    let request = FetchRequest::new(StateCode::CA, temp_dir.path());
    run_quiet(&fetcher, &request)
        .await
        .expect("encoded archive should still extract");

    assert_eq!(
        std::fs::read(temp_dir.path().join("CA.parquet")).unwrap(),
        PARQUET_PAYLOAD
    );
}

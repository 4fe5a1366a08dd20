//! Shared helpers for integration tests: in-memory gzip tar archives and
//! mock bucket endpoints serving them.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a gzip tar holding `members` as regular files.
pub fn build_tgz(members: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, *data)
            .expect("failed to append tar member");
    }
    builder
        .into_inner()
        .expect("failed to finish tar stream")
        .finish()
        .expect("failed to finish gzip stream")
}

/// Archive for `state` holding one `<state>.parquet` member with `payload`.
pub fn state_archive(state: &str, payload: &[u8]) -> Vec<u8> {
    let member = format!("{state}.parquet");
    build_tgz(&[(member.as_str(), payload)])
}

/// Mounts `body` at `/Weather/by_state_2/<tarname>` on `server`.
pub async fn mount_archive(server: &MockServer, tarname: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/Weather/by_state_2/{tarname}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(server)
        .await;
}

/// Mounts a 404 at `/Weather/by_state_2/<tarname>`, the way the bucket
/// answers for a key that doesn't exist.
pub async fn mount_missing(server: &MockServer, tarname: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/Weather/by_state_2/{tarname}")))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("<Error><Code>NoSuchKey</Code></Error>"),
        )
        .mount(server)
        .await;
}

//! HTTP client wrapper for downloading files.
//!
//! This module provides the `HttpClient` struct which handles streaming
//! downloads with proper timeout configuration and error handling.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_LENGTH;
use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::DownloadError;
use crate::user_agent;

/// HTTP client for downloading files with streaming support.
///
/// Create once and reuse; the inner reqwest client pools connections.
///
/// # Example
///
/// ```no_run
/// use weather_fetch::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new()?;
/// let result = client
///     .download_to_path("https://example.com/CA.tgz", Path::new("./CA.tgz"))
///     .await?;
/// println!("Downloaded to: {}", result.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// Metadata about a completed download.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadFileResult {
    /// Final output path.
    pub path: PathBuf,
    /// Bytes written to disk.
    pub bytes_downloaded: u64,
    /// Size announced by the server, when known.
    pub content_length: Option<u64>,
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large archives)
    /// - No transfer decoding: the body is saved exactly as sent
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend or system
    /// proxy configuration cannot be loaded.
    pub fn new() -> Result<Self, DownloadError> {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the client cannot be built.
    #[instrument(level = "debug")]
    pub fn new_with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent::default_download_user_agent())
            .build()
            .map_err(|source| DownloadError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Downloads `url` to exactly `dest`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - The server returns an empty body
    /// - Writing to disk fails
    ///
    /// On any error after the file was created, the partial file is removed.
    #[must_use = "download result contains the size of the downloaded file"]
    #[instrument(skip_all, fields(url = %url, dest = %dest.display()))]
    pub async fn download_to_path(
        &self,
        url: &str,
        dest: &Path,
    ) -> Result<DownloadFileResult, DownloadError> {
        debug!("starting download");

        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self.send_request(url).await?;
        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let mut file = File::create(dest)
            .await
            .map_err(|e| DownloadError::io(dest, e))?;

        let stream_result = stream_to_file(&mut file, response, url, dest).await;
        drop(file);

        let bytes_written = match stream_result {
            Ok(0) => Err(DownloadError::empty_body(url)),
            other => other,
        };
        if bytes_written.is_err() {
            debug!(path = %dest.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(dest).await;
        }
        let bytes_written = bytes_written?;

        info!(
            path = %dest.display(),
            bytes = bytes_written,
            "download complete"
        );

        Ok(DownloadFileResult {
            path: dest.to_path_buf(),
            bytes_downloaded: bytes_written,
            content_length,
        })
    }

    async fn send_request(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

//! The fetch-and-extract procedure.
//!
//! One call to [`Fetcher::run`] performs, in order:
//!
//! 1. create the data directory if absent
//! 2. remove any stale archive with the same name
//! 3. download `<base>/Weather/by_state_2/<tarname>` into the data directory
//! 4. list the archive (size, permissions)
//! 5. extract it into the data directory
//! 6. report the disk usage of the extracted artifact
//!
//! Each step returns a `Result` and the first failure aborts the rest, so a
//! 404 never reaches the extractor and a missing artifact is an error rather
//! than a silent no-op. Extraction is given the data directory explicitly;
//! the process working directory is left alone.
//!
//! # Example
//!
//! ```no_run
//! use weather_fetch::{FetchRequest, Fetcher, StateCode};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = Fetcher::with_defaults()?;
//! let request = FetchRequest::new(StateCode::CA, "/tmp/weather");
//! let report = fetcher.run(&request).await?;
//! println!("{} KiB", report.artifact.kib());
//! # Ok(())
//! # }
//! ```

mod error;
mod request;

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use url::Url;

use crate::download::{DownloadFileResult, HttpClient};
use crate::extract::extract_tar_gz;
use crate::report::{self, ArchiveListing, DiskUsage};
use crate::state::StateCode;

pub use error::FetchError;
pub use request::{DEFAULT_DATA_DIR, FetchRequest};

/// Public bucket hosting the per-state archives.
pub const DEFAULT_BASE_URL: &str = "https://mas-dse-open.s3.amazonaws.com";

/// Path segments between the base URL and the archive name.
const ARCHIVE_PATH_SEGMENTS: [&str; 2] = ["Weather", "by_state_2"];

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    /// State that was fetched.
    pub state: StateCode,
    /// URL the archive was downloaded from.
    pub url: String,
    /// Download metadata.
    pub download: DownloadFileResult,
    /// Archive listing taken after the download.
    pub archive: ArchiveListing,
    /// Paths of all extracted members.
    pub extracted: Vec<PathBuf>,
    /// Disk usage of the extracted artifact.
    pub artifact: DiskUsage,
}

/// Runs fetch requests against one archive host.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    base_url: Url,
}

impl Fetcher {
    /// Creates a fetcher for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidBaseUrl`] unless `base_url` is an
    /// absolute `http`/`https` URL.
    pub fn new(client: HttpClient, base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Creates a fetcher with default timeouts against [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Download`] if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(HttpClient::new()?, DEFAULT_BASE_URL)
    }

    /// URL of the archive named `tarname`.
    #[must_use]
    pub fn archive_url(&self, tarname: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // parse_base_url rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(ARCHIVE_PATH_SEGMENTS)
                .push(tarname);
        }
        url
    }

    /// Runs the procedure, printing progress lines to stdout.
    ///
    /// # Errors
    ///
    /// See [`run_with_output`](Self::run_with_output).
    pub async fn run(&self, request: &FetchRequest) -> Result<FetchReport, FetchError> {
        let mut stdout = std::io::stdout();
        self.run_with_output(request, &mut stdout).await
    }

    /// Runs the procedure, writing progress lines to `out`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step:
    /// - [`FetchError::Io`] creating the directory, removing the stale archive, or listing it
    /// - [`FetchError::Download`] for network failures, non-2xx status, or an empty body
    /// - [`FetchError::Extract`] for corrupt or unsafe archives
    /// - [`FetchError::ArtifactMissing`] if the artifact isn't in the archive
    /// - [`FetchError::Output`] if `out` can't be written
    #[instrument(
        skip(self, request, out),
        fields(state = %request.state(), data_dir = %request.data_dir().display())
    )]
    pub async fn run_with_output<W: Write>(
        &self,
        request: &FetchRequest,
        out: &mut W,
    ) -> Result<FetchReport, FetchError> {
        let data_dir = request.data_dir();
        let archive_path = request.archive_path();
        let url = self.archive_url(request.tarname());

        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| FetchError::io(data_dir, e))?;
        remove_stale_archive(&archive_path).await?;

        emit(out, &report::fetch_command_line(url.as_str(), &archive_path))?;
        let download = self
            .client
            .download_to_path(url.as_str(), &archive_path)
            .await?;

        let archive = ArchiveListing::read(&archive_path)
            .await
            .map_err(|e| FetchError::io(&archive_path, e))?;
        emit(out, &report::listing_line(&archive))?;

        let extracted = extract_tar_gz(&archive_path, data_dir).await?;

        let artifact_path = request.artifact_path();
        let artifact = match DiskUsage::read(&artifact_path).await {
            Ok(usage) => usage,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::ArtifactMissing {
                    path: artifact_path,
                    members: extracted.len(),
                });
            }
            Err(e) => return Err(FetchError::io(&artifact_path, e)),
        };
        emit(out, &report::disk_usage_line(&artifact))?;

        info!(
            archive_bytes = archive.size_bytes,
            artifact_bytes = artifact.apparent_bytes,
            members = extracted.len(),
            "fetch complete"
        );

        Ok(FetchReport {
            state: request.state(),
            url: url.into(),
            download,
            archive,
            extracted,
            artifact,
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got {}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot have path segments".to_string()));
    }
    Ok(url)
}

async fn remove_stale_archive(path: &Path) -> Result<(), FetchError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale archive");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FetchError::io(path, e)),
    }
}

fn emit<W: Write>(out: &mut W, line: &str) -> Result<(), FetchError> {
    writeln!(out, "{line}").map_err(|source| FetchError::Output { source })
}

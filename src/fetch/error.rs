//! Error type for the fetch-and-extract procedure.

use std::path::PathBuf;

use thiserror::Error;

use crate::download::DownloadError;
use crate::extract::ExtractError;
use crate::state::StateError;

/// Errors from [`Fetcher::run`](super::Fetcher::run), one variant per failing step.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The state code is not one the bucket serves.
    #[error(transparent)]
    InvalidState(#[from] StateError),

    /// An archive or artifact name override is not a plain file name.
    #[error("invalid file name '{name}': {reason}")]
    InvalidFileName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The configured base URL cannot host archive paths.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Preparing the data directory or inspecting a file failed.
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path being operated on.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The archive download failed.
    #[error("fetch failed: {0}")]
    Download(#[from] DownloadError),

    /// The archive could not be extracted.
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Extraction succeeded but the expected artifact was not among the members.
    #[error("extracted artifact {path} not found ({members} members extracted)")]
    ArtifactMissing {
        /// Where the artifact was expected.
        path: PathBuf,
        /// Number of members the archive did contain.
        members: usize,
    },

    /// Writing a progress line failed.
    #[error("failed to write progress output: {source}")]
    Output {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the remote archive does not exist (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Download(err) if err.is_not_found())
    }
}

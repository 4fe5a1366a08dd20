//! Weather Fetch Core Library
//!
//! This library downloads a per-state weather data archive from the public
//! object-storage bucket, extracts it into a local data directory, and reports
//! the size of the extracted columnar artifact.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`state`] - Closed set of state/province codes the bucket serves
//! - [`download`] - HTTP download client with streaming support
//! - [`extract`] - gzip tar extraction into an explicit directory
//! - [`fetch`] - The fetch-and-extract procedure tying the steps together
//! - [`report`] - Human-readable progress lines (fetch command, listing, disk usage)

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod extract;
pub mod fetch;
pub mod report;
pub mod state;
mod user_agent;

// Re-export commonly used types
pub use download::{DownloadError, DownloadFileResult, HttpClient};
pub use extract::{ExtractError, extract_tar_gz};
pub use fetch::{
    DEFAULT_BASE_URL, DEFAULT_DATA_DIR, FetchError, FetchReport, FetchRequest, Fetcher,
};
pub use report::{ArchiveListing, DiskUsage};
pub use state::{StateCode, StateError};

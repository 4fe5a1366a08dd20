//! HTTP download client for streaming archives to disk.
//!
//! This module provides functionality for downloading a single file from an
//! HTTP/HTTPS URL to an exact destination path, with streaming support so
//! multi-hundred-megabyte archives never sit in memory.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large files)
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Non-success status codes surface as typed errors
//! - Partial or empty files are removed on failure
//!
//! # Example
//!
//! ```no_run
//! use weather_fetch::download::HttpClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let result = client
//!     .download_to_path(
//!         "https://mas-dse-open.s3.amazonaws.com/Weather/by_state_2/NY.tgz",
//!         Path::new("./data/NY.tgz"),
//!     )
//!     .await?;
//! println!("Downloaded {} bytes", result.bytes_downloaded);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;

pub use client::{DownloadFileResult, HttpClient};
pub use error::DownloadError;

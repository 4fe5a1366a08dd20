//! Progress lines printed while fetching, and the file facts behind them.
//!
//! The lines mimic familiar shell output (`ls -lh`, `du`) so they read
//! naturally in a notebook cell, but they are for humans only. Callers that
//! need the numbers should use the fields of [`ArchiveListing`] and
//! [`DiskUsage`] directly.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Size and permissions of the downloaded archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveListing {
    /// Archive path on disk.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Permission string in `ls -l` form, e.g. `-rw-r--r--`.
    pub permissions: String,
}

impl ArchiveListing {
    /// Reads the listing facts for `path`.
    ///
    /// # Errors
    ///
    /// Returns the IO error from `stat` if the file cannot be inspected.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
            permissions: permissions_of(&metadata),
        })
    }
}

/// Disk usage of the extracted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    /// Artifact path on disk.
    pub path: PathBuf,
    /// Logical file length in bytes.
    pub apparent_bytes: u64,
    /// Bytes of allocated storage (block count times 512 on Unix).
    pub allocated_bytes: u64,
}

impl DiskUsage {
    /// Reads the disk usage of `path`.
    ///
    /// # Errors
    ///
    /// Returns the IO error from `stat`; `NotFound` when the file is absent.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            apparent_bytes: metadata.len(),
            allocated_bytes: allocated_bytes_of(&metadata),
        })
    }

    /// Allocated size in 1 KiB blocks, rounded up, as `du` reports it.
    #[must_use]
    pub fn kib(&self) -> u64 {
        self.allocated_bytes.div_ceil(1024)
    }
}

#[cfg(unix)]
fn permissions_of(metadata: &std::fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    mode_string(metadata.permissions().mode(), metadata.is_dir())
}

#[cfg(not(unix))]
fn permissions_of(metadata: &std::fs::Metadata) -> String {
    let mode = if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    };
    mode_string(mode, metadata.is_dir())
}

#[cfg(unix)]
fn allocated_bytes_of(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.blocks() * 512
}

#[cfg(not(unix))]
fn allocated_bytes_of(metadata: &std::fs::Metadata) -> u64 {
    metadata.len()
}

/// Renders permission bits in `ls -l` form.
#[must_use]
pub fn mode_string(mode: u32, is_dir: bool) -> String {
    let mut out = String::with_capacity(10);
    out.push(if is_dir { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

/// Formats a byte count the way `ls -h` does: `512`, `1.5K`, `12M`.
///
/// Values round up; one decimal is kept below ten.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["K", "M", "G", "T", "P"];

    if bytes < 1024 {
        return bytes.to_string();
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    loop {
        let tenths = (value * 10.0).ceil() / 10.0;
        if tenths < 10.0 {
            return format!("{tenths:.1}{}", UNITS[unit]);
        }
        let whole = value.ceil();
        if whole < 1024.0 || unit == UNITS.len() - 1 {
            return format!("{whole:.0}{}", UNITS[unit]);
        }
        value /= 1024.0;
        unit += 1;
    }
}

/// Line announcing the request about to be made.
#[must_use]
pub fn fetch_command_line(url: &str, archive_path: &Path) -> String {
    format!("GET {url} > {}", archive_path.display())
}

/// `ls -lh` style line for the downloaded archive.
#[must_use]
pub fn listing_line(listing: &ArchiveListing) -> String {
    format!(
        "{} {} {}",
        listing.permissions,
        human_size(listing.size_bytes),
        listing.path.display()
    )
}

/// `du` style line for the extracted artifact.
#[must_use]
pub fn disk_usage_line(usage: &DiskUsage) -> String {
    format!("{}\t{}", usage.kib(), usage.path.display())
}

//! Extraction of gzip-compressed tar archives.
//!
//! Members are written relative to an explicit destination directory; the
//! process working directory is never consulted or changed. Decoding is
//! synchronous, so the async entry point runs it on the blocking pool.

mod error;

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tokio::task::spawn_blocking;
use tracing::{debug, info, instrument};

pub use error::ExtractError;

/// Extracts every member of the gzip tar at `archive_path` into `dest`.
///
/// Returns the destination paths of the extracted members, in archive order.
///
/// # Errors
///
/// - [`ExtractError::Io`] if the archive can't be opened or a member can't be written
/// - [`ExtractError::Corrupt`] if the data is not valid gzip/tar or is truncated
/// - [`ExtractError::UnsafePath`] if a member would escape `dest`
/// - [`ExtractError::LinkMember`] if a member is a symlink or hardlink
/// - [`ExtractError::Empty`] if the archive has no members
#[instrument(skip_all, fields(archive = %archive_path.display(), dest = %dest.display()))]
pub async fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let archive_owned = archive_path.to_path_buf();
    let dest_owned = dest.to_path_buf();

    let extracted = spawn_blocking(move || extract_tar_gz_blocking(&archive_owned, &dest_owned))
        .await
        .map_err(|e| ExtractError::TaskFailed {
            archive: archive_path.to_path_buf(),
            reason: e.to_string(),
        })??;

    info!(members = extracted.len(), "extraction complete");
    Ok(extracted)
}

/// Synchronous extraction; see [`extract_tar_gz`].
///
/// # Errors
///
/// Same as [`extract_tar_gz`], minus [`ExtractError::TaskFailed`].
pub fn extract_tar_gz_blocking(
    archive_path: &Path,
    dest: &Path,
) -> Result<Vec<PathBuf>, ExtractError> {
    let file = File::open(archive_path).map_err(|e| ExtractError::io(archive_path, e))?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    let entries = archive
        .entries()
        .map_err(|e| ExtractError::corrupt(archive_path, e))?;

    let mut extracted = Vec::new();
    for entry in entries {
        let mut entry = entry.map_err(|e| ExtractError::corrupt(archive_path, e))?;
        let member = entry
            .path()
            .map_err(|e| ExtractError::corrupt(archive_path, e))?
            .into_owned();

        let kind = entry.header().entry_type();
        if kind.is_symlink() || kind.is_hard_link() {
            return Err(ExtractError::LinkMember {
                archive: archive_path.to_path_buf(),
                member,
            });
        }

        let target = dest.join(&member);
        let unpacked = entry
            .unpack_in(dest)
            .map_err(|e| classify_unpack_error(archive_path, &target, e))?;
        if !unpacked {
            return Err(ExtractError::UnsafePath {
                archive: archive_path.to_path_buf(),
                member,
            });
        }

        debug!(member = %member.display(), "extracted member");
        extracted.push(target);
    }

    if extracted.is_empty() {
        return Err(ExtractError::Empty {
            archive: archive_path.to_path_buf(),
        });
    }

    Ok(extracted)
}

// Decoder failures surface while a member body is being copied out, so they
// arrive through unpack_in alongside genuine write errors.
fn classify_unpack_error(archive_path: &Path, target: &Path, err: std::io::Error) -> ExtractError {
    match err.kind() {
        ErrorKind::InvalidData | ErrorKind::InvalidInput | ErrorKind::UnexpectedEof => {
            ExtractError::corrupt(archive_path, err)
        }
        _ => ExtractError::io(target, err),
    }
}

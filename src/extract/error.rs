//! Error types for archive extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while unpacking a gzip tar archive.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Filesystem error opening the archive or writing a member.
    #[error("IO error extracting to {path}: {source}")]
    Io {
        /// Path being read or written when the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The archive is not valid gzip/tar data, or is truncated.
    #[error("corrupt archive {archive}: {source}")]
    Corrupt {
        /// The archive being read.
        archive: PathBuf,
        /// The decoder error.
        #[source]
        source: std::io::Error,
    },

    /// A member path would land outside the destination directory.
    #[error("refusing to extract {member} from {archive}: path escapes destination")]
    UnsafePath {
        /// The archive being read.
        archive: PathBuf,
        /// The offending member path as stored in the archive.
        member: PathBuf,
    },

    /// A symlink or hardlink member, whose target could point anywhere.
    #[error("refusing to extract {member} from {archive}: link members are not allowed")]
    LinkMember {
        /// The archive being read.
        archive: PathBuf,
        /// The link member path as stored in the archive.
        member: PathBuf,
    },

    /// The archive decoded cleanly but held no members.
    #[error("archive {archive} contains no entries")]
    Empty {
        /// The archive being read.
        archive: PathBuf,
    },

    /// The blocking extraction task panicked or was cancelled.
    #[error("extraction task for {archive} failed: {reason}")]
    TaskFailed {
        /// The archive being read.
        archive: PathBuf,
        /// Join error description.
        reason: String,
    },
}

impl ExtractError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a corrupt-archive error.
    pub fn corrupt(archive: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Corrupt {
            archive: archive.into(),
            source,
        }
    }
}

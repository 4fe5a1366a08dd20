//! Parameters of a single fetch: which state, where to put it, what to call it.

use std::path::{Path, PathBuf};

use super::error::FetchError;
use crate::state::StateCode;

/// Default data directory, relative to where the analysis notebooks run.
pub const DEFAULT_DATA_DIR: &str = "../Data/Weather";

/// A validated fetch request.
///
/// The archive and artifact names default to `<state>.tgz` and
/// `<state>.parquet`; overrides must be plain file names so they stay
/// inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    state: StateCode,
    data_dir: PathBuf,
    tarname: String,
    parquet_name: String,
}

impl FetchRequest {
    /// Creates a request with default file names.
    pub fn new(state: StateCode, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            state,
            data_dir: data_dir.into(),
            tarname: state.archive_name(),
            parquet_name: state.artifact_name(),
        }
    }

    /// Parses `code` and creates a request with default file names.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidState`] if `code` is not a served region.
    pub fn for_code(code: &str, data_dir: impl Into<PathBuf>) -> Result<Self, FetchError> {
        Ok(Self::new(StateCode::parse(code)?, data_dir))
    }

    /// Overrides the archive file name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidFileName`] if `name` is not a plain file name.
    pub fn with_tarname(mut self, name: impl Into<String>) -> Result<Self, FetchError> {
        let name = name.into();
        validate_file_name(&name)?;
        self.tarname = name;
        Ok(self)
    }

    /// Overrides the extracted artifact file name.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidFileName`] if `name` is not a plain file name.
    pub fn with_parquet_name(mut self, name: impl Into<String>) -> Result<Self, FetchError> {
        let name = name.into();
        validate_file_name(&name)?;
        self.parquet_name = name;
        Ok(self)
    }

    #[must_use]
    pub fn state(&self) -> StateCode {
        self.state
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn tarname(&self) -> &str {
        &self.tarname
    }

    #[must_use]
    pub fn parquet_name(&self) -> &str {
        &self.parquet_name
    }

    /// `<data_dir>/<tarname>`
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.tarname)
    }

    /// `<data_dir>/<parquet_name>`
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.data_dir.join(&self.parquet_name)
    }
}

fn validate_file_name(name: &str) -> Result<(), FetchError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a directory")
    } else if name.contains(['/', '\\']) {
        Some("name contains a path separator")
    } else if name.contains('\0') {
        Some("name contains a NUL byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FetchError::InvalidFileName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_from_state() {
        let request = FetchRequest::new(StateCode::CA, "/tmp/weather");
        assert_eq!(request.tarname(), "CA.tgz");
        assert_eq!(request.parquet_name(), "CA.parquet");
        assert_eq!(request.archive_path(), PathBuf::from("/tmp/weather/CA.tgz"));
        assert_eq!(
            request.artifact_path(),
            PathBuf::from("/tmp/weather/CA.parquet")
        );
    }

    #[test]
    fn test_request_for_code_rejects_unknown_state() {
        let result = FetchRequest::for_code("ZZ", "/tmp/weather");
        assert!(matches!(result, Err(FetchError::InvalidState(_))));
    }

    #[test]
    fn test_request_overrides_apply() {
        let request = FetchRequest::for_code("NY", "data")
            .unwrap()
            .with_tarname("ny-latest.tgz")
            .unwrap()
            .with_parquet_name("ny.parquet")
            .unwrap();
        assert_eq!(request.state(), StateCode::NY);
        assert_eq!(request.archive_path(), PathBuf::from("data/ny-latest.tgz"));
        assert_eq!(request.artifact_path(), PathBuf::from("data/ny.parquet"));
    }

    #[test]
    fn test_request_rejects_path_like_overrides() {
        let base = FetchRequest::new(StateCode::TX, "data");
        for bad in ["", ".", "..", "../TX.tgz", "sub/TX.tgz", "a\\b", "x\0y"] {
            let result = base.clone().with_tarname(bad);
            assert!(
                matches!(result, Err(FetchError::InvalidFileName { .. })),
                "expected rejection for {bad:?}"
            );
            let result = base.clone().with_parquet_name(bad);
            assert!(
                matches!(result, Err(FetchError::InvalidFileName { .. })),
                "expected rejection for {bad:?}"
            );
        }
    }
}

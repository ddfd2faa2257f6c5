//! Centralized error types for xray-evidence.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the evidence library.
///
/// Every variant ends the current attachment attempt. None of them is
/// retryable and no partial record is ever returned alongside them.
#[derive(Error, Debug)]
pub enum EvidenceError {
    /// Neither a locator nor any content was supplied.
    #[error("no data to upload")]
    NoData,

    /// A locator was supplied but it is not path-like.
    #[error("path must be a string (got {0})")]
    InvalidLocator(String),

    /// The located file could not be opened or read.
    #[error("cannot open or read file `{}`", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The locator's extension is not in the media-type table.
    #[error("media type not found for extension `{0}`")]
    UnknownMediaType(String),

    /// Writing a report file failed.
    #[error("cannot write report `{}`: {source}", path.display())]
    Report {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias for `Result<T, EvidenceError>`.
pub type Result<T> = std::result::Result<T, EvidenceError>;

impl EvidenceError {
    /// Create a `FileRead` variant from the resolved path and an `io::Error`.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create a `Report` variant from the report path and an `io::Error`.
    pub fn report(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Report {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(EvidenceError::NoData.to_string(), "no data to upload");
        assert_eq!(
            EvidenceError::UnknownMediaType("xyz".into()).to_string(),
            "media type not found for extension `xyz`"
        );
        let err = EvidenceError::file_read(
            "/tmp/missing.txt",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(
            err.to_string(),
            "cannot open or read file `/tmp/missing.txt`"
        );
    }

    #[test]
    fn test_invalid_locator_message() {
        let err = EvidenceError::InvalidLocator("number".into());
        assert!(err.to_string().starts_with("path must be a string"));
    }
}

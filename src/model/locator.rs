//! File locator input.

use std::path::{Path, PathBuf};

use crate::error::{EvidenceError, Result};

/// A locator as received from the caller.
///
/// Callers working from loosely typed input (JSON manifests, CLI glue) can
/// hand over values that are not paths at all. Those are kept as
/// [`Locator::Invalid`] so the resolver can reject them with a proper error
/// instead of failing at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A path-like value.
    Path(PathBuf),
    /// Anything else; carries a short description of what was given.
    Invalid(String),
}

impl Locator {
    /// Build a locator from a JSON value.
    ///
    /// `null` yields `None`; strings become paths; every other value is
    /// kept as an invalid locator.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        let kind = match value {
            Value::Null => return None,
            Value::String(s) => return Some(Self::Path(PathBuf::from(s))),
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Some(Self::Invalid(kind.to_string()))
    }

    /// An empty path counts as no locator at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Path(path) => path.as_os_str().is_empty(),
            Self::Invalid(_) => false,
        }
    }

    /// Borrow the path, or fail if the locator is not path-like.
    pub fn as_path(&self) -> Result<&Path> {
        match self {
            Self::Path(path) => Ok(path),
            Self::Invalid(kind) => Err(EvidenceError::InvalidLocator(kind.clone())),
        }
    }
}

impl From<&str> for Locator {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for Locator {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Locator {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Locator {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

//! The evidence record attached to a test result.

use serde::{Deserialize, Serialize};

use super::content::Content;
use crate::media_type::{APP_JSON, APP_ZIP, IMAGE_JPEG, IMAGE_PNG, TEXT_HTML, TEXT_PLAIN};

/// A finished attachment: base64 payload, display filename, media type.
///
/// Serializes with the exact keys the Xray import format expects:
/// `data`, `filename`, `contentType`. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    data: String,
    filename: String,
    content_type: String,
}

impl EvidenceRecord {
    /// Build a record from raw content with an explicit filename and type.
    pub fn new(
        content: impl Into<Content>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self::from_base64(content.into().to_base64(), filename, content_type)
    }

    pub(crate) fn from_base64(
        data: String,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            data,
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn jpeg(content: impl Into<Content>, filename: impl Into<String>) -> Self {
        Self::new(content, filename, IMAGE_JPEG)
    }

    pub fn png(content: impl Into<Content>, filename: impl Into<String>) -> Self {
        Self::new(content, filename, IMAGE_PNG)
    }

    pub fn text(content: impl Into<Content>, filename: impl Into<String>) -> Self {
        Self::new(content, filename, TEXT_PLAIN)
    }

    pub fn html(content: impl Into<Content>, filename: impl Into<String>) -> Self {
        Self::new(content, filename, TEXT_HTML)
    }

    pub fn json(content: impl Into<Content>, filename: impl Into<String>) -> Self {
        Self::new(content, filename, APP_JSON)
    }

    pub fn zip(content: impl Into<Content>, filename: impl Into<String>) -> Self {
        Self::new(content, filename, APP_ZIP)
    }

    /// Base64-encoded payload.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Display filename, including the extension when one is known.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type string.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

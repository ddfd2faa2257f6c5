//! An attachment request: locator, content and declared media type.

use serde::Deserialize;

use super::content::Content;
use super::locator::Locator;

/// The three optional inputs of one attachment call.
///
/// Empty values (empty path, empty text, empty declared type) are treated
/// exactly like absent ones by the accessors. Empty bytes are kept.
///
/// Deserializes from the manifest form
/// `{"path": ..., "data": "...", "bytes": [...], "ctype": "..."}`
/// where `data` and `bytes` are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct EvidenceRequest {
    locator: Option<Locator>,
    content: Option<Content>,
    declared_type: Option<String>,
}

impl EvidenceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file locator.
    pub fn locator(mut self, locator: impl Into<Locator>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    /// Set the content (text or bytes).
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the declared media type. Passed through verbatim.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.declared_type = Some(content_type.into());
        self
    }

    /// The locator, if one was given and is not empty.
    pub fn get_locator(&self) -> Option<&Locator> {
        self.locator.as_ref().filter(|l| !l.is_empty())
    }

    /// The content, if any was given and is not an empty string.
    pub fn get_content(&self) -> Option<&Content> {
        self.content.as_ref().filter(|c| !c.is_absent())
    }

    /// The declared media type, if one was given and is not empty.
    pub fn get_declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequest {
    #[serde(default)]
    path: serde_json::Value,
    data: Option<String>,
    bytes: Option<Vec<u8>>,
    ctype: Option<String>,
}

impl TryFrom<RawRequest> for EvidenceRequest {
    type Error = String;

    fn try_from(raw: RawRequest) -> std::result::Result<Self, Self::Error> {
        let content = match (raw.data, raw.bytes) {
            (Some(_), Some(_)) => {
                return Err("`data` and `bytes` are mutually exclusive".to_string())
            }
            (Some(text), None) => Some(Content::Text(text)),
            (None, Some(bytes)) => Some(Content::Bytes(bytes)),
            (None, None) => None,
        };
        Ok(Self {
            locator: Locator::from_json(&raw.path),
            content,
            declared_type: raw.ctype,
        })
    }
}

//! Raw attachment content.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::media_type::{APP_OCTET_STREAM, TEXT_PLAIN};

/// Content handed over by the caller, either text or raw bytes.
///
/// The variant decides the default media type when the caller neither
/// declares one nor supplies a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Character data. Always encoded as UTF-8 before base64.
    Text(String),
    /// Binary data, encoded as-is.
    Bytes(Vec<u8>),
}

impl Content {
    /// The bytes that will be encoded.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// `true` for an empty string or an empty byte buffer.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// `true` only for an empty string. An empty byte buffer is still
    /// content: it encodes to `""` and never falls back to a file read.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// `true` if the content is binary.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// Media type used when nothing else determines one.
    pub fn default_content_type(&self) -> &'static str {
        if self.is_binary() {
            APP_OCTET_STREAM
        } else {
            TEXT_PLAIN
        }
    }

    /// Standard base64 (with padding) of the content bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

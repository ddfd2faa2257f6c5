//! Extension ↔ MIME type table.
//!
//! The table is an ordered slice rather than a map so that reverse lookups
//! are deterministic: when several extensions share one MIME type, the
//! entry listed first wins (`image/jpeg` → `jpeg`, `application/yaml` → `yml`).

pub const APP_OCTET_STREAM: &str = "application/octet-stream";
pub const APP_JSON: &str = "application/json";
pub const APP_ZIP: &str = "application/zip";
pub const IMAGE_JPEG: &str = "image/jpeg";
pub const IMAGE_PNG: &str = "image/png";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain";

/// Canonical (extension, MIME type) pairs. Order is significant.
pub const MEDIA_TYPES: &[(&str, &str)] = &[
    ("bin", APP_OCTET_STREAM),
    ("csv", "text/csv"),
    ("gz", "application/gzip"),
    ("html", TEXT_HTML),
    ("json", APP_JSON),
    ("jpeg", IMAGE_JPEG),
    ("jpg", IMAGE_JPEG),
    ("js", "text/javascript"),
    ("md", "text/markdown"),
    ("pcap", "application/vnd.tcdump.pcap"),
    ("png", IMAGE_PNG),
    ("spdx", "text/spdx"),
    ("txt", TEXT_PLAIN),
    ("xml", "text/xml"),
    ("yml", "application/yaml"),
    ("yaml", "application/yaml"),
    ("zip", APP_ZIP),
];

/// Look up the MIME type for an extension token (no leading dot).
///
/// Matching is exact; `"JSON"` is not the same token as `"json"`.
pub fn by_extension(extension: &str) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, ctype)| *ctype)
}

/// Return the first extension registered for a MIME type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    MEDIA_TYPES
        .iter()
        .find(|(_, ctype)| *ctype == content_type)
        .map(|(ext, _)| *ext)
}

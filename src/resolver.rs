//! Turn an attachment request into an evidence record.
//!
//! | locator | content | type | outcome                                          |
//! |---------|---------|------|--------------------------------------------------|
//! | no      | no      | any  | `NoData`                                         |
//! | no      | yes     | no   | octet-stream for bytes, text/plain for text      |
//! | no      | yes     | yes  | declared type, `attachmentN[.ext]`               |
//! | yes     | yes     | yes  | everything as given, file name from the locator  |
//! | yes     | yes     | no   | type from the locator's extension                |
//! | yes     | no      | yes  | file contents, declared type                     |
//! | yes     | no      | no   | file contents, type from the extension           |
//!
//! Without a locator an unknown type just leaves the filename bare. With a
//! locator an unknown extension is an error: the extension is the only
//! authority on the type there.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

use crate::counter::AttachmentCounter;
use crate::error::{EvidenceError, Result};
use crate::media_type;
use crate::model::evidence::EvidenceRecord;
use crate::model::request::EvidenceRequest;

const ANONYMOUS_PREFIX: &str = "attachment";

/// Resolves attachment requests for one test session.
#[derive(Debug, Default)]
pub struct EvidenceResolver {
    counter: AttachmentCounter,
}

impl EvidenceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing counter, e.g. one restored from a previous run.
    pub fn with_counter(counter: AttachmentCounter) -> Self {
        Self { counter }
    }

    pub fn counter(&self) -> &AttachmentCounter {
        &self.counter
    }

    /// Resolve one request.
    ///
    /// `base_dir` is the directory relative locators are read from,
    /// normally the directory of the test file that asked for the attachment.
    pub fn resolve(&self, request: &EvidenceRequest, base_dir: &Path) -> Result<EvidenceRecord> {
        let record = match request.get_locator() {
            None => self.resolve_anonymous(request)?,
            Some(locator) => {
                let path = locator.as_path()?;
                resolve_located(path, request, base_dir)?
            }
        };
        debug!(
            filename = record.filename(),
            content_type = record.content_type(),
            size = record.data().len(),
            "Resolved evidence"
        );
        Ok(record)
    }

    fn resolve_anonymous(&self, request: &EvidenceRequest) -> Result<EvidenceRecord> {
        let content = request.get_content().ok_or(EvidenceError::NoData)?;
        let content_type = request
            .get_declared_type()
            .unwrap_or_else(|| content.default_content_type());

        // Nothing below can fail, so the counter only moves on success.
        let mut filename = format!("{ANONYMOUS_PREFIX}{}", self.counter.next_value());
        if let Some(ext) = media_type::extension_for(content_type) {
            filename.push('.');
            filename.push_str(ext);
        }

        Ok(EvidenceRecord::from_base64(
            content.to_base64(),
            filename,
            content_type,
        ))
    }
}

fn resolve_located(
    path: &Path,
    request: &EvidenceRequest,
    base_dir: &Path,
) -> Result<EvidenceRecord> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            EvidenceError::InvalidLocator(format!("`{}` with no file name", path.display()))
        })?;

    let data = match request.get_content() {
        Some(content) => content.to_base64(),
        None => read_base64(&resolve_path(path, base_dir))?,
    };

    let content_type = match request.get_declared_type() {
        Some(declared) => declared.to_string(),
        None => {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            media_type::by_extension(&ext)
                .ok_or(EvidenceError::UnknownMediaType(ext))?
                .to_string()
        }
    };

    Ok(EvidenceRecord::from_base64(data, filename, content_type))
}

/// Join relative locators onto the caller's base directory.
fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn read_base64(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading evidence file");
    let bytes = std::fs::read(path).map_err(|e| EvidenceError::file_read(path, e))?;
    Ok(STANDARD.encode(bytes))
}

/// Shorthand for resolving a single request with a throwaway resolver.
///
/// Anonymous attachments always come out as `attachment1`; use a shared
/// [`EvidenceResolver`] when numbering matters.
pub fn resolve_once(request: &EvidenceRequest, base_dir: &Path) -> Result<EvidenceRecord> {
    EvidenceResolver::new().resolve(request, base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::Content;
    use crate::model::locator::Locator;

    fn anon(content: impl Into<Content>) -> EvidenceRequest {
        EvidenceRequest::new().content(content)
    }

    #[test]
    fn test_no_data() {
        let resolver = EvidenceResolver::new();
        let request = EvidenceRequest::new().content_type("text/plain");
        assert!(matches!(
            resolver.resolve(&request, Path::new(".")),
            Err(EvidenceError::NoData)
        ));
        assert!(matches!(
            resolver.resolve(&EvidenceRequest::new(), Path::new(".")),
            Err(EvidenceError::NoData)
        ));
        assert_eq!(resolver.counter().peek(), 1);
    }

    #[test]
    fn test_anonymous_text() {
        let resolver = EvidenceResolver::new();
        let first = resolver.resolve(&anon("hello"), Path::new(".")).unwrap();
        let second = resolver.resolve(&anon("hello"), Path::new(".")).unwrap();
        assert_eq!(first.filename(), "attachment1.txt");
        assert_eq!(first.content_type(), "text/plain");
        assert_eq!(first.data(), "aGVsbG8=");
        assert_eq!(second.filename(), "attachment2.txt");
    }

    #[test]
    fn test_injected_counter() {
        let counter = AttachmentCounter::new();
        counter.next_value();
        counter.next_value();
        let resolver = EvidenceResolver::with_counter(counter);
        let record = resolver.resolve(&anon("x"), Path::new(".")).unwrap();
        assert_eq!(record.filename(), "attachment3.txt");
    }

    #[test]
    fn test_anonymous_bytes() {
        let resolver = EvidenceResolver::new();
        let record = resolver
            .resolve(&anon(&b"Test\xb6"[..]), Path::new("."))
            .unwrap();
        assert_eq!(record.filename(), "attachment1.bin");
        assert_eq!(record.content_type(), "application/octet-stream");
        assert_eq!(record.data(), "VGVzdLY=");
    }

    #[test]
    fn test_anonymous_declared_type_picks_extension() {
        let resolver = EvidenceResolver::new();
        let record = resolver
            .resolve(&anon("x").content_type("text/csv"), Path::new("."))
            .unwrap();
        assert_eq!(record.filename(), "attachment1.csv");
        assert_eq!(record.content_type(), "text/csv");

        let yaml = resolver
            .resolve(&anon("a: 1").content_type("application/yaml"), Path::new("."))
            .unwrap();
        assert_eq!(yaml.filename(), "attachment2.yml");
    }

    #[test]
    fn test_anonymous_unknown_type_has_no_extension() {
        let resolver = EvidenceResolver::new();
        let record = resolver
            .resolve(&anon("--Test").content_type("text/prs.testing"), Path::new("."))
            .unwrap();
        assert_eq!(record.filename(), "attachment1");
        assert_eq!(record.content_type(), "text/prs.testing");
    }

    #[test]
    fn test_declared_type_not_normalized() {
        let resolver = EvidenceResolver::new();
        let record = resolver
            .resolve(&anon("x").content_type(" Text/CSV "), Path::new("."))
            .unwrap();
        assert_eq!(record.content_type(), " Text/CSV ");
        assert_eq!(record.filename(), "attachment1");
    }

    #[test]
    fn test_located_with_content_skips_disk() {
        let resolver = EvidenceResolver::new();
        let request = EvidenceRequest::new()
            .locator("/definitely/not/here/anything.txt")
            .content("override");
        let record = resolver.resolve(&request, Path::new(".")).unwrap();
        assert_eq!(record.filename(), "anything.txt");
        assert_eq!(record.content_type(), "text/plain");
        assert_eq!(record.data(), "b3ZlcnJpZGU=");
        assert_eq!(resolver.counter().peek(), 1);
    }

    #[test]
    fn test_located_unknown_extension() {
        let resolver = EvidenceResolver::new();
        let request = EvidenceRequest::new()
            .locator("data.unknownext")
            .content("x");
        match resolver.resolve(&request, Path::new(".")) {
            Err(EvidenceError::UnknownMediaType(ext)) => assert_eq!(ext, "unknownext"),
            other => panic!("expected UnknownMediaType, got {other:?}"),
        }
    }

    #[test]
    fn test_located_without_extension() {
        let request = EvidenceRequest::new().locator("Makefile").content("all:");
        assert!(matches!(
            resolve_once(&request, Path::new(".")),
            Err(EvidenceError::UnknownMediaType(ext)) if ext.is_empty()
        ));
    }

    #[test]
    fn test_located_declared_type_wins() {
        let request = EvidenceRequest::new()
            .locator("data.unknownext")
            .content("x")
            .content_type("text/x-custom");
        let record = resolve_once(&request, Path::new(".")).unwrap();
        assert_eq!(record.content_type(), "text/x-custom");
        assert_eq!(record.filename(), "data.unknownext");
    }

    #[test]
    fn test_empty_bytes_are_encoded_not_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("disk.txt"), "ON DISK").unwrap();
        let request = EvidenceRequest::new()
            .locator("disk.txt")
            .content(Vec::<u8>::new());
        let record = resolve_once(&request, dir.path()).unwrap();
        assert_eq!(record.data(), "");
        assert_eq!(record.filename(), "disk.txt");
        assert_eq!(record.content_type(), "text/plain");

        let missing = EvidenceRequest::new()
            .locator("missing.txt")
            .content(Vec::<u8>::new());
        assert_eq!(resolve_once(&missing, dir.path()).unwrap().data(), "");
    }

    #[test]
    fn test_anonymous_empty_bytes() {
        let resolver = EvidenceResolver::new();
        let record = resolver
            .resolve(&anon(Vec::<u8>::new()), Path::new("."))
            .unwrap();
        assert_eq!(record.filename(), "attachment1.bin");
        assert_eq!(record.content_type(), "application/octet-stream");
        assert_eq!(record.data(), "");

        assert!(matches!(
            resolver.resolve(&anon(""), Path::new(".")),
            Err(EvidenceError::NoData)
        ));
        assert_eq!(resolver.counter().peek(), 2);
    }

    #[test]
    fn test_locator_without_file_name() {
        for path in ["..", "/"] {
            let request = EvidenceRequest::new().locator(path).content("x");
            assert!(matches!(
                resolve_once(&request, Path::new(".")),
                Err(EvidenceError::InvalidLocator(_))
            ));
        }
    }

    #[test]
    fn test_invalid_locator() {
        let request = EvidenceRequest::new()
            .locator(Locator::Invalid("array".into()))
            .content("x");
        assert!(matches!(
            resolve_once(&request, Path::new(".")),
            Err(EvidenceError::InvalidLocator(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let request = EvidenceRequest::new().locator("testt.txt");
        match resolve_once(&request, dir.path()) {
            Err(EvidenceError::FileRead { path, .. }) => {
                assert_eq!(path, dir.path().join("testt.txt"))
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_relative_and_absolute_paths() {
        let base = Path::new("/tests/suite");
        assert_eq!(
            resolve_path(Path::new("data/a.json"), base),
            PathBuf::from("/tests/suite/data/a.json")
        );
        assert_eq!(
            resolve_path(Path::new("/abs/a.json"), base),
            PathBuf::from("/abs/a.json")
        );
    }
}

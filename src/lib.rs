//! `xray-evidence` — resolve test evidence into Xray attachment records.
//!
//! Given a file locator, raw content and a declared media type (each
//! optional), [`resolver::EvidenceResolver`] derives the `data` /
//! `filename` / `contentType` record that goes into a test result. The
//! [`collection`] and [`report`] modules gather those records per test and
//! write them out in the Xray JSON import format.

pub mod collection;
pub mod config;
pub mod counter;
pub mod error;
pub mod manifest;
pub mod media_type;
pub mod model;
pub mod report;
pub mod resolver;

pub use collection::{EvidenceCollection, EvidenceStash};
pub use error::{EvidenceError, Result};
pub use model::content::Content;
pub use model::evidence::EvidenceRecord;
pub use model::locator::Locator;
pub use model::request::EvidenceRequest;
pub use resolver::EvidenceResolver;

//! Core data model types for evidence requests and records.

pub mod content;
pub mod evidence;
pub mod locator;
pub mod request;

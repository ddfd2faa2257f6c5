//! Per-test evidence collections and the session stash that owns them.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::model::evidence::EvidenceRecord;
use crate::model::request::EvidenceRequest;
use crate::resolver::EvidenceResolver;

/// Ordered evidence records gathered while one test runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceCollection {
    records: Vec<EvidenceRecord>,
}

impl EvidenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EvidenceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[EvidenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<EvidenceRecord> {
        self.records
    }
}

/// Session-wide store of collections keyed by test identifier.
///
/// Owns the resolver, so anonymous attachment numbering runs across every
/// test of the session. A test gets a collection on its first successful
/// attachment; failed attempts leave the stash untouched.
#[derive(Debug, Default)]
pub struct EvidenceStash {
    resolver: EvidenceResolver,
    collections: HashMap<String, EvidenceCollection>,
}

impl EvidenceStash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(resolver: EvidenceResolver) -> Self {
        Self {
            resolver,
            collections: HashMap::new(),
        }
    }

    pub fn resolver(&self) -> &EvidenceResolver {
        &self.resolver
    }

    /// Resolve a request and append the record to the test's collection.
    pub fn attach(
        &mut self,
        test_id: &str,
        request: &EvidenceRequest,
        base_dir: &Path,
    ) -> Result<&EvidenceRecord> {
        let record = self.resolver.resolve(request, base_dir)?;
        let collection = self.collections.entry(test_id.to_string()).or_default();
        collection.push(record);
        Ok(&collection.records[collection.records.len() - 1])
    }

    /// Read a test's collection without removing it.
    pub fn get(&self, test_id: &str) -> Option<&EvidenceCollection> {
        self.collections.get(test_id)
    }

    /// Hand a finished test's collection over to the reporting side.
    pub fn take(&mut self, test_id: &str) -> Option<EvidenceCollection> {
        self.collections.remove(test_id)
    }

    /// Drop all collections and restart anonymous numbering.
    pub fn reset(&mut self) {
        self.collections.clear();
        self.resolver.counter().reset();
    }
}

//! Batch manifests: a list of tests with the evidence each one attaches.
//!
//! ```json
//! {
//!   "tests": [
//!     {
//!       "testKey": "JIRA-1",
//!       "status": "PASS",
//!       "comment": "smoke run",
//!       "evidences": [
//!         { "path": "screenshot.png" },
//!         { "data": "<h1>Test</h1>", "ctype": "text/html" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::collection::EvidenceStash;
use crate::model::request::EvidenceRequest;
use crate::report::{Status, TestResult};

/// A parsed batch manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub tests: Vec<ManifestTest>,
}

/// One test in a manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestTest {
    pub test_key: String,
    pub status: Status,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub evidences: Vec<EvidenceRequest>,
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read manifest {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid manifest {}", path.display()))
    }

    /// Total number of evidence requests across all tests.
    pub fn evidence_count(&self) -> usize {
        self.tests.iter().map(|t| t.evidences.len()).sum()
    }

    /// First test key that appears more than once, if any.
    pub fn duplicate_key(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.tests
            .iter()
            .map(|t| t.test_key.as_str())
            .find(|key| !seen.insert(*key))
    }

    /// Resolve every evidence request through `stash` and build the test
    /// results in manifest order.
    ///
    /// A test key listed twice is rejected unless `allow_duplicate_ids` is
    /// set. The first failing request aborts the run, naming the test and
    /// the position of the request; the records that test had already
    /// gathered are dropped from `stash`.
    pub fn resolve(
        &self,
        stash: &mut EvidenceStash,
        base_dir: &Path,
        allow_duplicate_ids: bool,
        progress: &dyn Fn(usize, usize),
    ) -> anyhow::Result<Vec<TestResult>> {
        if !allow_duplicate_ids {
            if let Some(key) = self.duplicate_key() {
                anyhow::bail!("Duplicated test case ids: {key}");
            }
        }

        let total = self.evidence_count();
        let mut done = 0;
        let mut results = Vec::with_capacity(self.tests.len());

        for test in &self.tests {
            for (i, request) in test.evidences.iter().enumerate() {
                progress(done, total);
                let attached = stash.attach(&test.test_key, request, base_dir).map(|_| ());
                if let Err(e) = attached {
                    stash.take(&test.test_key);
                    return Err(anyhow::Error::new(e)
                        .context(format!("{}: evidence #{}", test.test_key, i + 1)));
                }
                done += 1;
            }

            let mut result = TestResult::new(&test.test_key, test.status);
            if let Some(ref comment) = test.comment {
                result = result.comment(comment);
            }
            if let Some(collection) = stash.take(&test.test_key) {
                result = result.evidences(collection);
            }
            results.push(result);
        }
        progress(total, total);

        Ok(results)
    }
}

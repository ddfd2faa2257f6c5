//! Xray JSON import report.
//!
//! Shape (keys are what the import endpoint expects):
//!
//! ```json
//! {
//!   "testExecutionKey": "JIRA-20",
//!   "info": { "startDate": "...", "finishDate": "...", "testPlanKey": "JIRA-10" },
//!   "tests": [
//!     { "testKey": "JIRA-1", "status": "PASS", "comment": "...", "evidences": [ ... ] }
//!   ]
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::collection::EvidenceCollection;
use crate::config::ReportConfig;
use crate::error::{EvidenceError, Result};
use crate::model::evidence::EvidenceRecord;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
const COMMENT_OPEN: &str = "{noformat:borderWidth=0px|bgColor=transparent}";
const COMMENT_CLOSE: &str = "{noformat}";

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
    Todo,
    Executing,
    Aborted,
}

/// One entry of the report's `tests` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    test_key: String,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    evidences: Vec<EvidenceRecord>,
}

impl TestResult {
    pub fn new(test_key: impl Into<String>, status: Status) -> Self {
        Self {
            test_key: test_key.into(),
            status,
            comment: None,
            evidences: Vec::new(),
        }
    }

    /// Attach a comment. It is rendered verbatim inside a `noformat` block.
    pub fn comment(mut self, text: &str) -> Self {
        self.comment = Some(format!("{COMMENT_OPEN}{text}{COMMENT_CLOSE}"));
        self
    }

    pub fn evidences(mut self, collection: EvidenceCollection) -> Self {
        self.evidences = collection.into_records();
        self
    }

    pub fn test_key(&self) -> &str {
        &self.test_key
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn evidence_records(&self) -> &[EvidenceRecord] {
        &self.evidences
    }
}

/// The `info` block of a test execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionInfo {
    #[serde(serialize_with = "serialize_date")]
    start_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_date")]
    finish_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_plan_key: Option<String>,
    #[serde(rename = "version", skip_serializing_if = "Option::is_none")]
    fix_version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    test_environments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// A complete test execution ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestExecution {
    #[serde(skip_serializing_if = "Option::is_none")]
    test_execution_key: Option<String>,
    info: ExecutionInfo,
    tests: Vec<TestResult>,
}

impl TestExecution {
    /// Start an execution at `started`, taking metadata from the config.
    pub fn new(config: &ReportConfig, started: DateTime<Utc>) -> Self {
        Self {
            test_execution_key: config.test_execution_key.clone(),
            info: ExecutionInfo {
                start_date: started,
                finish_date: started,
                test_plan_key: config.test_plan_key.clone(),
                fix_version: config.fix_version.clone(),
                test_environments: config.test_environments.clone(),
                summary: config.summary.clone(),
                description: config.description.clone(),
            },
            tests: Vec::new(),
        }
    }

    pub fn push(&mut self, result: TestResult) {
        self.tests.push(result);
    }

    pub fn finish(&mut self, finished: DateTime<Utc>) {
        self.info.finish_date = finished;
    }

    pub fn tests(&self) -> &[TestResult] {
        &self.tests
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report to `path`, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| EvidenceError::report(path, e))?;
        }
        let json = self
            .to_json()
            .map_err(|e| EvidenceError::report(path, e.into()))?;
        std::fs::write(path, json).map_err(|e| EvidenceError::report(path, e))?;
        tracing::info!(path = %path.display(), tests = self.tests.len(), "Wrote report");
        Ok(())
    }
}

fn serialize_date<S: Serializer>(
    date: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

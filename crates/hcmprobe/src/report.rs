//! Outcome reporting: one verdict line per completed test.
//!
//! The destination is an injected [`ReportSink`] rather than an implicit
//! global path, so isolated runs can point the suite at their own file (or at
//! memory). The shipped file sink is append-only and never resets between
//! runs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SuiteResult;

/// The pass/fail/skip outcome of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped
    Skipped,
    /// Outcome could not be determined
    Unknown,
}

impl Verdict {
    /// Report-file spelling of the verdict
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Check if this is a passing verdict
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if this is a failing verdict
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One appended outcome: test name and verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Test name
    pub test: String,
    /// Verdict
    pub verdict: Verdict,
}

impl OutcomeRecord {
    /// Create a record
    #[must_use]
    pub fn new(test: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            test: test.into(),
            verdict,
        }
    }

    /// A passing record
    #[must_use]
    pub fn passed(test: impl Into<String>) -> Self {
        Self::new(test, Verdict::Passed)
    }

    /// A failing record
    #[must_use]
    pub fn failed(test: impl Into<String>) -> Self {
        Self::new(test, Verdict::Failed)
    }

    /// A skipped record
    #[must_use]
    pub fn skipped(test: impl Into<String>) -> Self {
        Self::new(test, Verdict::Skipped)
    }

    /// Report-file line for this record
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} → {}", self.test, self.verdict)
    }
}

/// Destination for outcome records
pub trait ReportSink {
    /// Append one record
    fn record(&mut self, record: &OutcomeRecord) -> SuiteResult<()>;
}

/// Append-only plain-text report file, one line per completed test
#[derive(Debug, Clone)]
pub struct FileReport {
    path: PathBuf,
}

impl FileReport {
    /// Create a sink writing to `path`; the file is created on first record
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The report path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReport {
    fn record(&mut self, record: &OutcomeRecord) -> SuiteResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.line())?;
        Ok(())
    }
}

/// In-memory sink for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryReport {
    records: Vec<OutcomeRecord>,
}

impl MemoryReport {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded outcomes, in order
    #[must_use]
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Report lines, in order
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(OutcomeRecord::line).collect()
    }
}

impl ReportSink for MemoryReport {
    fn record(&mut self, record: &OutcomeRecord) -> SuiteResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

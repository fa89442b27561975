#![forbid(unsafe_code)]

//! Per-render records of a snapshot run.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::{Appearance, SnapshotDevice};
use crate::engine::SnapshotOutcome;

/// One render of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotRecord {
    pub test_name: String,
    pub name: String,
    pub appearance: Appearance,
    pub device: SnapshotDevice,
    #[serde(flatten)]
    pub outcome: SnapshotOutcome,
}

/// All records of a run, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub records: Vec<SnapshotRecord>,
}

impl SnapshotReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SnapshotRecord> {
        self.records.iter().filter(|r| r.outcome.is_failure())
    }

    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Number of records with the given outcome kind.
    pub fn count(&self, predicate: impl Fn(&SnapshotOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(&r.outcome)).count()
    }

    /// Distinct test names, in first-seen order.
    pub fn test_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.test_name.as_str()) {
                names.push(&record.test_name);
            }
        }
        names
    }

    /// Human-readable failure summary. Empty when everything passed.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for record in self.failures() {
            if let SnapshotOutcome::Failed { reason } = &record.outcome {
                let _ = writeln!(out, "=== {}/{} ===\n{reason}", record.test_name, record.name);
            }
        }
        out
    }

    /// Panic with the failure summary if any render failed.
    pub fn assert_passed(&self) {
        if !self.passed() {
            let failed = self.failures().count();
            panic!(
                "\n{failed} of {} snapshots failed. Set BLESS=1 to update.\n\n{}",
                self.len(),
                self.summary()
            );
        }
    }
}

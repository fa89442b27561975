#![forbid(unsafe_code)]

//! The comparison engine seam and the errors of a snapshot run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use demokit::{CatalogError, Toolkit};
use serde::Serialize;

use crate::config::{SnapshotDevice, Traits};

/// Everything an engine needs to compare one render.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest<'a> {
    /// Reference group, usually the demo identifier.
    pub test_name: &'a str,
    /// Reference name within the group.
    pub name: &'a str,
    pub device: SnapshotDevice,
    pub traits: Traits,
    pub precision: f64,
    pub perceptual_precision: f64,
    /// Write the reference instead of comparing.
    pub record: bool,
}

/// Result of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SnapshotOutcome {
    Matched,
    Recorded,
    Failed { reason: String },
}

impl SnapshotOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SnapshotOutcome::Failed { .. })
    }
}

/// Compares a rendered controller against its reference.
pub trait ComparisonEngine<T: Toolkit> {
    fn compare(
        &mut self,
        controller: &T::Controller,
        request: &ComparisonRequest<'_>,
    ) -> Result<SnapshotOutcome, SnapshotError>;
}

/// Errors raised during a snapshot run.
#[derive(Debug)]
pub enum SnapshotError {
    /// The demo could not be presented.
    Catalog(CatalogError),
    /// A reference could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The same reference name was produced twice in one run.
    DuplicateName { test_name: String, name: String },
    /// A test or image name that would leave the reference directory.
    InvalidName { test_name: String, name: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Catalog(e) => write!(f, "{e}"),
            SnapshotError::Io { path, source } => {
                write!(f, "snapshot I/O error at {}: {source}", path.display())
            }
            SnapshotError::DuplicateName { test_name, name } => {
                write!(f, "duplicate snapshot name '{name}' in '{test_name}'")
            }
            SnapshotError::InvalidName { test_name, name } => {
                write!(
                    f,
                    "snapshot name '{name}' in '{test_name}' is not a single path component"
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Catalog(e) => Some(e),
            SnapshotError::Io { source, .. } => Some(source),
            SnapshotError::DuplicateName { .. } | SnapshotError::InvalidName { .. } => None,
        }
    }
}

impl From<CatalogError> for SnapshotError {
    fn from(error: CatalogError) -> Self {
        SnapshotError::Catalog(error)
    }
}

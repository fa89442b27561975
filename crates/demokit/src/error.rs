#![forbid(unsafe_code)]

//! Catalog configuration errors.
//!
//! Every variant here is a bug in how a catalog was put together (a stale
//! index, a demo that cannot be presented, a section that does not exist).
//! Library calls return them; binaries and test helpers turn them into a
//! loud failure naming the offending identifier.

use std::fmt;

/// Errors raised while resolving or presenting catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Group index outside `[0, count)`.
    GroupOutOfRange { index: usize, count: usize },
    /// Demo index outside the group's `[0, count)`.
    IndexOutOfRange {
        group: String,
        index: usize,
        count: usize,
    },
    /// The demo matches none of the presentable shapes.
    UnpresentableDemo { identifier: String },
    /// A computed section key has no section.
    MissingSection { key: String },
    /// Row outside a section.
    RowOutOfRange {
        section: String,
        row: usize,
        count: usize,
    },
    /// Tweak index outside `[0, tweak_count)`.
    TweakOutOfRange {
        identifier: String,
        index: usize,
        count: usize,
    },
    /// A tweak operation on a demo without tweaks.
    NotTweakable { identifier: String },
    /// A presentation operation with nothing presented.
    NothingPresented,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::GroupOutOfRange { index, count } => {
                write!(f, "group index {index} out of range (catalog has {count} groups)")
            }
            CatalogError::IndexOutOfRange {
                group,
                index,
                count,
            } => write!(
                f,
                "demo index {index} out of range for group '{group}' ({count} demos)"
            ),
            CatalogError::UnpresentableDemo { identifier } => write!(
                f,
                "demo '{identifier}' is neither a raw view, a declarative view, a preview group nor a controller"
            ),
            CatalogError::MissingSection { key } => {
                write!(f, "no section for key '{key}'")
            }
            CatalogError::RowOutOfRange {
                section,
                row,
                count,
            } => write!(
                f,
                "row {row} out of range for section '{section}' ({count} rows)"
            ),
            CatalogError::TweakOutOfRange {
                identifier,
                index,
                count,
            } => write!(
                f,
                "tweak index {index} out of range for demo '{identifier}' ({count} tweaks)"
            ),
            CatalogError::NotTweakable { identifier } => {
                write!(f, "demo '{identifier}' has no tweaks")
            }
            CatalogError::NothingPresented => write!(f, "no demo is presented"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

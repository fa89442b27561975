#![forbid(unsafe_code)]

//! Snapshot testing for demokit catalogs.
//!
//! - **Matrix driver**: renders every demo under light and dark appearance on
//!   a tablet and a phone, once per tweak for tweakable demos.
//! - **Golden text engine**: stores renders as `.snap` files and compares
//!   them with line-level precision thresholds.
//!
//! # Quick Start
//!
//! ```ignore
//! use demokit::HeadlessToolkit;
//! use demokit_harness::{GoldenTextEngine, HeadlessTextRenderer, SnapshotConfig, SnapshotMatrix};
//!
//! #[test]
//! fn components_match_references() {
//!     let toolkit = HeadlessToolkit::new();
//!     let engine = GoldenTextEngine::headless("tests/snapshots", HeadlessTextRenderer);
//!     let mut matrix = SnapshotMatrix::new(&toolkit, engine, SnapshotConfig::from_env());
//!     matrix.snapshot_group(&ComponentsGroup).unwrap();
//!     matrix.finish().assert_passed();
//! }
//! ```
//!
//! # Updating Snapshots
//!
//! Run tests with `BLESS=1` to create or update reference files:
//!
//! ```sh
//! BLESS=1 cargo test
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod golden;
pub mod matrix;
pub mod naming;
pub mod report;

pub use config::{Appearance, SizeClass, SnapshotConfig, SnapshotDevice, Traits};
pub use engine::{ComparisonEngine, ComparisonRequest, SnapshotError, SnapshotOutcome};
pub use golden::{GoldenTextEngine, HeadlessTextRenderer, TextRenderer, diff_text};
pub use matrix::SnapshotMatrix;
pub use naming::{sanitize, snapshot_name};
pub use report::{SnapshotRecord, SnapshotReport};

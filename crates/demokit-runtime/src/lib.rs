#![forbid(unsafe_code)]

//! demokit runtime: durable navigation state.
//!
//! # Key Components
//!
//! - [`StateStore`] - Cached key-value state over a pluggable [`StorageBackend`]
//! - [`MemoryStorage`] / [`FileStorage`] - Ephemeral and JSON-file backends
//! - [`NavigationState`] - Typed view of the selected group, demo, and tweak
//! - [`ResumeTracker`] - Decides when to restore or clear the last selection
//!
//! All of it runs on the UI thread: nothing here is `Sync`, and writes are
//! last-write-wins.

pub mod navigation;
pub mod state_persistence;

pub use navigation::{Activation, NavigationState, ResumePhase, ResumeTracker, Selection};
pub use state_persistence::{
    FileStorage, MemoryStorage, StateStore, StorageBackend, StorageError, StorageResult,
};

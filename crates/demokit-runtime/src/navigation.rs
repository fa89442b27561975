#![forbid(unsafe_code)]

//! Persisted navigation state and the resume state machine.
//!
//! The catalog remembers three optional indices: the selected group, the
//! presented demo within it, and the tweak applied to that demo. They are
//! written through to storage on every selection so a relaunch lands where
//! the user left off.
//!
//! Dismissing a demo does not clear anything by itself. The root only learns
//! about a dismissal when it becomes active again, so [`ResumeTracker`]
//! models that explicitly:
//!
//! ```text
//!              activate (demo persisted) ──► Resume
//!   Launching ─┤
//!              activate (nothing)        ──► Unchanged
//!        │
//!        ▼
//!      Idle ◄──────── activate: clear demo + tweak ─────── AwaitingFirstActivation
//!        │                                                          ▲
//!        └──────────────────────── dismissed ───────────────────────┘
//! ```
//!
//! A second activation without an intervening dismissal is a no-op.

use crate::state_persistence::{MemoryStorage, StateStore, StorageBackend, StorageResult};

/// Storage key of the selected group's original index.
pub const SELECTED_GROUP_KEY: &str = "demokit.selected_group_index";
/// Storage key of the presented demo's index within the group.
pub const SELECTED_DEMOABLE_KEY: &str = "demokit.selected_demoable_index";
/// Storage key of the applied tweak's index.
pub const SELECTED_TWEAK_KEY: &str = "demokit.selected_tweak_index";

/// Snapshot of the three persisted indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub group: Option<usize>,
    pub demoable: Option<usize>,
    pub tweak: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// NavigationState
// ─────────────────────────────────────────────────────────────────────────────

/// Typed, write-through view of the persisted selection.
///
/// Setters update the in-memory value first and then flush; a failed flush
/// is returned to the caller but the new value stays visible for the rest of
/// the session.
#[derive(Debug)]
pub struct NavigationState {
    store: StateStore,
}

impl NavigationState {
    /// Open navigation state over `backend`.
    ///
    /// Unreadable storage is logged and treated as "no prior selection".
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let mut store = StateStore::new(backend);
        if let Err(error) = store.load() {
            tracing::warn!(
                backend = %store.backend_name(),
                %error,
                "could not load navigation state, starting fresh"
            );
        }
        Self { store }
    }

    /// Ephemeral navigation state.
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStorage::new()))
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        Selection {
            group: self.selected_group(),
            demoable: self.selected_demoable(),
            tweak: self.selected_tweak(),
        }
    }

    #[must_use]
    pub fn selected_group(&self) -> Option<usize> {
        self.store.get_index(SELECTED_GROUP_KEY)
    }

    #[must_use]
    pub fn selected_demoable(&self) -> Option<usize> {
        self.store.get_index(SELECTED_DEMOABLE_KEY)
    }

    #[must_use]
    pub fn selected_tweak(&self) -> Option<usize> {
        self.store.get_index(SELECTED_TWEAK_KEY)
    }

    pub fn set_selected_group(&mut self, index: Option<usize>) -> StorageResult<()> {
        self.write(SELECTED_GROUP_KEY, index)
    }

    pub fn set_selected_demoable(&mut self, index: Option<usize>) -> StorageResult<()> {
        self.write(SELECTED_DEMOABLE_KEY, index)
    }

    pub fn set_selected_tweak(&mut self, index: Option<usize>) -> StorageResult<()> {
        self.write(SELECTED_TWEAK_KEY, index)
    }

    /// Forget the presented demo and its tweak together. The group stays.
    pub fn clear_demo_selection(&mut self) -> StorageResult<()> {
        self.store.set_index(SELECTED_DEMOABLE_KEY, None);
        self.store.set_index(SELECTED_TWEAK_KEY, None);
        self.store.flush().map(|_| ())
    }

    /// Underlying store.
    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    fn write(&mut self, key: &str, index: Option<usize>) -> StorageResult<()> {
        tracing::debug!(key, ?index, "persisting selection");
        self.store.set_index(key, index);
        self.store.flush().map(|_| ())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ResumeTracker
// ─────────────────────────────────────────────────────────────────────────────

/// Where the root is in its activation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePhase {
    /// Process just started; the first activation may resume a demo.
    Launching,
    /// A presented demo was dismissed; the next activation clears it.
    AwaitingFirstActivation,
    /// Nothing pending.
    Idle,
}

/// What an activation asks the root to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Re-present the persisted demo (and tweak).
    Resume(Selection),
    /// Demo and tweak selection were cleared after a dismissal.
    Cleared,
    /// Nothing to do.
    Unchanged,
}

/// The explicit dismissal/activation state machine.
#[derive(Debug, Clone)]
pub struct ResumeTracker {
    phase: ResumePhase,
}

impl Default for ResumeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: ResumePhase::Launching,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ResumePhase {
        self.phase
    }

    /// A presented demo went away.
    pub fn on_dismissed(&mut self) {
        tracing::debug!(from = ?self.phase, "demo dismissed");
        self.phase = ResumePhase::AwaitingFirstActivation;
    }

    /// The catalog root became active.
    ///
    /// Storage failures while clearing are logged; the in-memory selection is
    /// cleared regardless.
    pub fn on_activated(&mut self, navigation: &mut NavigationState) -> Activation {
        let activation = match self.phase {
            ResumePhase::Launching => {
                let selection = navigation.selection();
                if selection.demoable.is_some() {
                    Activation::Resume(selection)
                } else {
                    Activation::Unchanged
                }
            }
            ResumePhase::AwaitingFirstActivation => {
                if let Err(error) = navigation.clear_demo_selection() {
                    tracing::warn!(%error, "failed to persist cleared demo selection");
                }
                Activation::Cleared
            }
            ResumePhase::Idle => Activation::Unchanged,
        };
        tracing::debug!(from = ?self.phase, ?activation, "root activated");
        self.phase = ResumePhase::Idle;
        activation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn persisted(group: usize, demoable: usize, tweak: usize) -> MemoryStorage {
        let mut entries = HashMap::new();
        entries.insert(SELECTED_GROUP_KEY.to_string(), json!(group));
        entries.insert(SELECTED_DEMOABLE_KEY.to_string(), json!(demoable));
        entries.insert(SELECTED_TWEAK_KEY.to_string(), json!(tweak));
        MemoryStorage::with_entries(entries)
    }

    #[test]
    fn fresh_state_has_no_selection() {
        let nav = NavigationState::in_memory();
        assert_eq!(nav.selection(), Selection::default());
    }

    #[test]
    fn setters_write_through() {
        let storage = MemoryStorage::new();
        let mut nav = NavigationState::open(Box::new(storage.clone()));
        nav.set_selected_group(Some(3)).unwrap();
        nav.set_selected_demoable(Some(1)).unwrap();
        assert_eq!(storage.entries().get(SELECTED_GROUP_KEY), Some(&json!(3)));
        assert_eq!(storage.entries().get(SELECTED_DEMOABLE_KEY), Some(&json!(1)));
        assert!(!nav.store().is_dirty());
    }

    #[test]
    fn writing_none_removes_key() {
        let storage = persisted(1, 2, 3);
        let mut nav = NavigationState::open(Box::new(storage.clone()));
        nav.set_selected_tweak(None).unwrap();
        assert!(!storage.entries().contains_key(SELECTED_TWEAK_KEY));
        assert_eq!(nav.selected_tweak(), None);
    }

    #[test]
    fn clear_demo_selection_keeps_group() {
        let storage = persisted(1, 2, 3);
        let mut nav = NavigationState::open(Box::new(storage.clone()));
        nav.clear_demo_selection().unwrap();
        assert_eq!(
            nav.selection(),
            Selection {
                group: Some(1),
                demoable: None,
                tweak: None
            }
        );
        assert_eq!(storage.entries().len(), 1);
    }

    #[test]
    fn first_activation_resumes_persisted_demo() {
        let mut nav = NavigationState::open(Box::new(persisted(2, 5, 1)));
        let mut tracker = ResumeTracker::new();
        assert_eq!(tracker.phase(), ResumePhase::Launching);
        let activation = tracker.on_activated(&mut nav);
        assert_eq!(
            activation,
            Activation::Resume(Selection {
                group: Some(2),
                demoable: Some(5),
                tweak: Some(1)
            })
        );
        assert_eq!(tracker.phase(), ResumePhase::Idle);
    }

    #[test]
    fn first_activation_without_demo_is_unchanged() {
        let mut nav = NavigationState::in_memory();
        nav.set_selected_group(Some(0)).unwrap();
        let mut tracker = ResumeTracker::new();
        assert_eq!(tracker.on_activated(&mut nav), Activation::Unchanged);
    }

    #[test]
    fn second_activation_without_dismissal_keeps_selection() {
        let mut nav = NavigationState::open(Box::new(persisted(2, 5, 1)));
        let mut tracker = ResumeTracker::new();
        tracker.on_activated(&mut nav);
        assert_eq!(tracker.on_activated(&mut nav), Activation::Unchanged);
        assert_eq!(nav.selected_demoable(), Some(5));
        assert_eq!(nav.selected_tweak(), Some(1));
    }

    #[test]
    fn activation_after_dismissal_clears_once() {
        let mut nav = NavigationState::open(Box::new(persisted(2, 5, 1)));
        let mut tracker = ResumeTracker::new();
        tracker.on_activated(&mut nav);

        tracker.on_dismissed();
        assert_eq!(tracker.phase(), ResumePhase::AwaitingFirstActivation);
        // Dismissal alone does not clear.
        assert_eq!(nav.selected_demoable(), Some(5));

        assert_eq!(tracker.on_activated(&mut nav), Activation::Cleared);
        assert_eq!(nav.selected_group(), Some(2));
        assert_eq!(nav.selected_demoable(), None);
        assert_eq!(nav.selected_tweak(), None);

        nav.set_selected_demoable(Some(4)).unwrap();
        assert_eq!(tracker.on_activated(&mut nav), Activation::Unchanged);
        assert_eq!(nav.selected_demoable(), Some(4));
    }
}

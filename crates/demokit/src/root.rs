#![forbid(unsafe_code)]

//! The catalog root: the screen listing the selected group's demos.
//!
//! The root owns the persisted [`NavigationState`] and feeds its activation
//! and dismissal events to a [`ResumeTracker`]. On the first activation
//! after launch it re-presents the demo the user was looking at; on the
//! first activation after a dismissal it forgets that demo.

use std::fmt;

use demokit_runtime::{Activation, NavigationState, ResumeTracker, StorageResult};

use crate::catalog::{Catalog, Sections};
use crate::error::{CatalogError, CatalogResult};
use crate::model::{Detent, TweakOption};
use crate::presentation::{Presentation, apply_tweak, present};
use crate::sorting::SortedItem;
use crate::toolkit::Toolkit;
use crate::tweak_affordance::TweakList;

/// Title shown when no group is selected.
pub const NO_GROUP_TITLE: &str = "??";

/// Title of the group selector sheet.
pub const GROUP_SELECTOR_TITLE: &str = "Demo groups";

/// The sheet listing every group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSelector {
    pub title: String,
    pub rows: Vec<SortedItem>,
    pub detents: Vec<Detent>,
    /// Original index of the current group.
    pub selected: Option<usize>,
}

pub struct CatalogRoot<T: Toolkit> {
    catalog: Catalog<T>,
    navigation: NavigationState,
    tracker: ResumeTracker,
    selected_group: Option<usize>,
    presented: Option<Presentation<T>>,
}

impl<T: Toolkit> CatalogRoot<T> {
    /// Root over `catalog`, starting on the persisted group when it still
    /// exists.
    pub fn new(catalog: Catalog<T>, navigation: NavigationState) -> Self {
        let selected_group = catalog.initial_group(navigation.selected_group());
        Self {
            catalog,
            navigation,
            tracker: ResumeTracker::new(),
            selected_group,
            presented: None,
        }
    }

    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn tracker(&self) -> &ResumeTracker {
        &self.tracker
    }

    /// Original index of the listed group.
    pub fn selected_group(&self) -> Option<usize> {
        self.selected_group
    }

    /// Title bar text: the listed group's title.
    pub fn title(&self) -> String {
        self.selected_group
            .and_then(|index| self.catalog.group(index).ok())
            .map(|group| group.title())
            .unwrap_or_else(|| NO_GROUP_TITLE.to_string())
    }

    pub fn sorted_groups(&self) -> &[SortedItem] {
        self.catalog.sorted_groups()
    }

    /// Sectioned rows of the listed group. Empty when there is no group.
    pub fn group_sections(&self) -> CatalogResult<Sections> {
        match self.selected_group {
            Some(index) => self.catalog.sectioned_items(index),
            None => Ok(Sections::default()),
        }
    }

    /// The group selector, offered only when there is something to choose.
    pub fn group_selector(&self) -> Option<GroupSelector> {
        (self.catalog.len() > 1).then(|| GroupSelector {
            title: GROUP_SELECTOR_TITLE.to_string(),
            rows: self.catalog.sorted_groups().to_vec(),
            detents: vec![Detent::Medium, Detent::Large],
            selected: self.selected_group,
        })
    }

    pub fn presented(&self) -> Option<&Presentation<T>> {
        self.presented.as_ref()
    }

    pub fn presented_mut(&mut self) -> Option<&mut Presentation<T>> {
        self.presented.as_mut()
    }

    /// List `index` and remember it.
    pub fn select_group(&mut self, index: usize) -> CatalogResult<()> {
        self.catalog.group(index)?;
        self.selected_group = Some(index);
        tracing::debug!(group = index, "group selected");
        log_storage(self.navigation.set_selected_group(Some(index)), "group");
        Ok(())
    }

    /// Present demo `index` of the listed group. Any previous tweak
    /// selection is forgotten.
    pub fn select_demo(&mut self, toolkit: &T, index: usize) -> CatalogResult<&mut Presentation<T>> {
        let group = self.selected_group.ok_or(CatalogError::GroupOutOfRange {
            index: 0,
            count: self.catalog.len(),
        })?;
        let demoable = self.catalog.resolve(group, index)?;
        log_storage(self.navigation.set_selected_group(Some(group)), "group");
        log_storage(self.navigation.set_selected_demoable(Some(index)), "demo");
        log_storage(self.navigation.set_selected_tweak(None), "tweak");
        let presentation = present(toolkit, demoable)?;
        tracing::debug!(group, index, identifier = %presentation.identifier(), "demo selected");
        Ok(self.presented.insert(presentation))
    }

    /// The presented demo was dismissed.
    pub fn dismiss(&mut self) -> Option<Presentation<T>> {
        self.tracker.on_dismissed();
        self.presented.take()
    }

    /// The root became visible.
    ///
    /// Returns the re-presented demo when resuming after launch. A demo
    /// persisted without a group resumes in the listed group. Persisted
    /// indices that no longer fit the catalog are ignored.
    pub fn activate(&mut self, toolkit: &T) -> CatalogResult<Option<&mut Presentation<T>>> {
        match self.tracker.on_activated(&mut self.navigation) {
            Activation::Resume(selection) => {
                let (Some(group), Some(index)) = (self.selected_group, selection.demoable) else {
                    return Ok(None);
                };
                if selection.group.is_some_and(|persisted| persisted != group) {
                    tracing::warn!(
                        persisted = ?selection.group,
                        listed = group,
                        "persisted demo belongs to a group that no longer exists"
                    );
                    return Ok(None);
                }
                let demoable = match self.catalog.resolve(group, index) {
                    Ok(demoable) => demoable,
                    Err(error) => {
                        tracing::warn!(%error, "persisted demo no longer exists");
                        return Ok(None);
                    }
                };
                if let Some(tweak) = selection.tweak
                    && demoable.as_tweakable().is_some()
                    && let Err(error) = apply_tweak(&*demoable, tweak)
                {
                    tracing::warn!(%error, "persisted tweak no longer exists");
                }
                let presentation = present(toolkit, demoable)?;
                tracing::debug!(group, index, tweak = ?selection.tweak, "resumed demo");
                Ok(Some(self.presented.insert(presentation)))
            }
            Activation::Cleared | Activation::Unchanged => Ok(None),
        }
    }

    /// Open the tweak list of the presented demo.
    pub fn open_tweak_list(&mut self) -> CatalogResult<TweakList> {
        let selected = self.navigation.selected_tweak();
        self.presented
            .as_mut()
            .ok_or(CatalogError::NothingPresented)?
            .open_tweak_list(selected)
    }

    /// Select a tweak of the presented demo.
    pub fn select_tweak(&mut self, index: usize) -> CatalogResult<TweakOption> {
        let presentation = self
            .presented
            .as_mut()
            .ok_or(CatalogError::NothingPresented)?;
        presentation.select_tweak(index, &mut self.navigation)
    }
}

impl<T: Toolkit> fmt::Debug for CatalogRoot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogRoot")
            .field("catalog", &self.catalog)
            .field("selected_group", &self.selected_group)
            .field("phase", &self.tracker.phase())
            .field("presented", &self.presented)
            .finish()
    }
}

fn log_storage(result: StorageResult<()>, what: &str) {
    if let Err(error) = result {
        tracing::warn!(what, %error, "failed to persist selection");
    }
}

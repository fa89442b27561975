#![forbid(unsafe_code)]

//! The catalog registry.
//!
//! Holds the caller's groups in declaration order, immutable for the
//! registry's lifetime. Everything shown to the user is a sorted projection
//! that maps back to declaration indices.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{DemoGroup, Demoable, GroupItem};
use crate::sorting::{SortedItem, sort_by_title};
use crate::toolkit::Toolkit;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Section key of a title: its first character, uppercased. Empty titles
/// map to the empty key.
pub fn section_key(title: &str) -> String {
    title
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Items of a group bucketed by section key, keys in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: BTreeMap<String, Vec<SortedItem>>,
}

impl Sections {
    /// Bucket already-sorted items. Order within a bucket is preserved.
    pub fn from_sorted(items: Vec<SortedItem>) -> Self {
        let mut sections: BTreeMap<String, Vec<SortedItem>> = BTreeMap::new();
        for item in items {
            sections
                .entry(section_key(&item.title))
                .or_default()
                .push(item);
        }
        Self { sections }
    }

    /// Section keys in display order.
    pub fn keys(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    pub fn items(&self, key: &str) -> CatalogResult<&[SortedItem]> {
        self.sections
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::MissingSection { key: key.into() })
    }

    /// Item at `row` of the `section`-th section in display order.
    pub fn item_at(&self, section: usize, row: usize) -> CatalogResult<&SortedItem> {
        let (key, items) =
            self.sections
                .iter()
                .nth(section)
                .ok_or_else(|| CatalogError::MissingSection {
                    key: format!("#{section}"),
                })?;
        items.get(row).ok_or_else(|| CatalogError::RowOutOfRange {
            section: key.clone(),
            row,
            count: items.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of rows across sections.
    pub fn row_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// `(key, items)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SortedItem])> {
        self.sections
            .iter()
            .map(|(key, items)| (key.as_str(), items.as_slice()))
    }
}

// ---------------------------------------------------------------------------
// Group helpers
// ---------------------------------------------------------------------------

/// Checked row lookup.
pub fn item<T: Toolkit>(group: &dyn DemoGroup<T>, index: usize) -> CatalogResult<GroupItem> {
    check_index(group, index)?;
    Ok(group.item_at(index))
}

/// Checked demo lookup.
pub fn resolve<T: Toolkit>(
    group: &dyn DemoGroup<T>,
    index: usize,
) -> CatalogResult<Rc<dyn Demoable<T>>> {
    check_index(group, index)?;
    Ok(group.demoable_at(index))
}

/// Rows of `group` sorted by title.
pub fn sorted_items<T: Toolkit>(group: &dyn DemoGroup<T>) -> Vec<SortedItem> {
    let items: Vec<SortedItem> = (0..group.count())
        .map(|index| SortedItem::new(index, group.item_at(index).title))
        .collect();
    sort_by_title(&items)
}

/// Rows of `group` sorted, then bucketed by section key.
pub fn sectioned_items<T: Toolkit>(group: &dyn DemoGroup<T>) -> Sections {
    Sections::from_sorted(sorted_items(group))
}

fn check_index<T: Toolkit>(group: &dyn DemoGroup<T>, index: usize) -> CatalogResult<()> {
    let count = group.count();
    if index < count {
        Ok(())
    } else {
        Err(CatalogError::IndexOutOfRange {
            group: group.title(),
            index,
            count,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable registry of demo groups.
pub struct Catalog<T: Toolkit> {
    groups: Vec<Box<dyn DemoGroup<T>>>,
    sorted: Vec<SortedItem>,
}

impl<T: Toolkit> Catalog<T> {
    pub fn new(groups: Vec<Box<dyn DemoGroup<T>>>) -> Self {
        let items: Vec<SortedItem> = groups
            .iter()
            .enumerate()
            .map(|(index, group)| SortedItem::new(index, group.title()))
            .collect();
        let sorted = sort_by_title(&items);
        tracing::debug!(groups = groups.len(), "catalog built");
        Self { groups, sorted }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups sorted by title.
    pub fn sorted_groups(&self) -> &[SortedItem] {
        &self.sorted
    }

    pub fn group(&self, index: usize) -> CatalogResult<&dyn DemoGroup<T>> {
        self.groups
            .get(index)
            .map(|g| g.as_ref())
            .ok_or(CatalogError::GroupOutOfRange {
                index,
                count: self.groups.len(),
            })
    }

    /// Groups in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = &dyn DemoGroup<T>> {
        self.groups.iter().map(|g| g.as_ref())
    }

    pub fn sectioned_items(&self, group: usize) -> CatalogResult<Sections> {
        Ok(sectioned_items(self.group(group)?))
    }

    pub fn resolve(&self, group: usize, index: usize) -> CatalogResult<Rc<dyn Demoable<T>>> {
        resolve(self.group(group)?, index)
    }

    /// Group to show first: the persisted one if it still exists, otherwise
    /// the first group in sorted order.
    pub fn initial_group(&self, persisted: Option<usize>) -> Option<usize> {
        match persisted {
            Some(index) if index < self.groups.len() => Some(index),
            Some(index) => {
                tracing::warn!(
                    index,
                    count = self.groups.len(),
                    "persisted group no longer exists"
                );
                self.sorted.first().map(|item| item.original_index)
            }
            None => self.sorted.first().map(|item| item.original_index),
        }
    }
}

impl<T: Toolkit> fmt::Debug for Catalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("groups", &self.sorted)
            .finish()
    }
}

#![forbid(unsafe_code)]

//! Alphabetical projections that remember where each entry came from.

use serde::Serialize;

/// A title paired with the stable index it was listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortedItem {
    pub original_index: usize,
    pub title: String,
}

impl SortedItem {
    pub fn new(original_index: usize, title: impl Into<String>) -> Self {
        Self {
            original_index,
            title: title.into(),
        }
    }
}

/// Stable sort by title using byte-wise comparison.
///
/// Case matters (`"Zebra"` sorts before `"apple"`) and equal titles keep
/// their relative order. The input is left untouched.
pub fn sort_by_title(items: &[SortedItem]) -> Vec<SortedItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.title.as_bytes().cmp(b.title.as_bytes()));
    sorted
}

/// Index every title by its position, then sort.
pub fn sorted_titles<I, S>(titles: I) -> Vec<SortedItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: Vec<SortedItem> = titles
        .into_iter()
        .enumerate()
        .map(|(index, title)| SortedItem::new(index, title))
        .collect();
    sort_by_title(&items)
}

//! Property-based invariant tests for title sorting and sectioning.
//!
//! These verify structural invariants that must hold for any list of titles:
//!
//! 1. Sorting is a permutation: every original index appears exactly once.
//! 2. Titles come out in non-decreasing byte order.
//! 3. Equal titles keep their declaration order.
//! 4. Sorting an already sorted list changes nothing.
//! 5. Sections partition the sorted list, and every row sits under its key.

use demokit::Sections;
use demokit::catalog::section_key;
use demokit::sorting::{sort_by_title, sorted_titles};
use proptest::prelude::*;

fn titles_strategy() -> impl Strategy<Value = Vec<String>> {
    // Small alphabet so duplicates and shared first letters are common.
    prop::collection::vec("[abAB ]{0,3}", 0..24)
}

proptest! {
    #[test]
    fn sort_is_a_permutation(titles in titles_strategy()) {
        let sorted = sorted_titles(titles.clone());
        prop_assert_eq!(sorted.len(), titles.len());

        let mut seen: Vec<usize> = sorted.iter().map(|item| item.original_index).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..titles.len()).collect::<Vec<_>>());

        for item in &sorted {
            prop_assert_eq!(&item.title, &titles[item.original_index]);
        }
    }

    #[test]
    fn sort_orders_bytes_and_is_stable(titles in titles_strategy()) {
        let sorted = sorted_titles(titles);
        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.title.as_bytes() <= b.title.as_bytes());
            if a.title == b.title {
                prop_assert!(a.original_index < b.original_index);
            }
        }
    }

    #[test]
    fn sort_is_idempotent(titles in titles_strategy()) {
        let once = sorted_titles(titles);
        let twice = sort_by_title(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sections_partition_sorted_rows(titles in titles_strategy()) {
        let sorted = sorted_titles(titles);
        let sections = Sections::from_sorted(sorted.clone());
        prop_assert_eq!(sections.row_count(), sorted.len());

        let keys = sections.keys();
        let mut ordered = keys.clone();
        ordered.sort_unstable();
        prop_assert_eq!(&keys, &ordered);

        let mut flattened = Vec::new();
        for (key, rows) in sections.iter() {
            prop_assert!(!rows.is_empty());
            for row in rows {
                prop_assert_eq!(section_key(&row.title), key);
            }
            flattened.extend(rows.iter().cloned());
        }
        // Within a section rows keep their sorted order.
        for (key, rows) in sections.iter() {
            let expected: Vec<_> = sorted
                .iter()
                .filter(|item| section_key(&item.title) == key)
                .cloned()
                .collect();
            prop_assert_eq!(rows, expected.as_slice());
        }
        prop_assert_eq!(flattened.len(), sorted.len());
    }
}

#![forbid(unsafe_code)]

//! Reference names for rendered snapshots.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{Appearance, SnapshotDevice};

/// Runs of anything outside `[A-Za-z0-9]`.
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("Invalid non-alphanumeric regex"));

/// Lowercase `identifier` and collapse every non-alphanumeric run to `-`.
///
/// Leading and trailing runs are kept as a single hyphen:
/// `"Dark Mode!"` becomes `"dark-mode-"` and `"!!!"` becomes `"-"`.
pub fn sanitize(identifier: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(&identifier.to_lowercase(), "-")
        .into_owned()
}

/// `<appearance>_<device>[_<suffix>]`.
///
/// The suffix is used as given; callers pass it through [`sanitize`].
pub fn snapshot_name(appearance: Appearance, device: SnapshotDevice, suffix: Option<&str>) -> String {
    [Some(appearance.name()), Some(device.name()), suffix]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sanitize_collapses_runs() {
        assert_eq!(sanitize("Large Size"), "large-size");
        assert_eq!(sanitize("largeSize"), "largesize");
        assert_eq!(sanitize("a  --  b"), "a-b");
    }

    #[test]
    fn sanitize_keeps_edge_runs() {
        assert_eq!(sanitize("Dark Mode!"), "dark-mode-");
        assert_eq!(sanitize("  padded"), "-padded");
        assert_eq!(sanitize("!!!"), "-");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn sanitize_drops_non_ascii_letters() {
        assert_eq!(sanitize("Café Noir"), "caf-noir");
    }

    #[test]
    fn name_joins_present_parts() {
        let suffix = sanitize("Large Size");
        assert_eq!(
            snapshot_name(Appearance::Dark, SnapshotDevice::IPhone, Some(&suffix)),
            "dark_iPhone_large-size"
        );
        assert_eq!(
            snapshot_name(Appearance::Light, SnapshotDevice::IPad, None),
            "light_iPad"
        );
    }

    proptest! {
        #[test]
        fn sanitized_is_lowercase_alphanumeric_or_hyphen(s in "\\PC{0,24}") {
            let out = sanitize(&s);
            prop_assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!out.contains("--"));
        }

        #[test]
        fn sanitize_is_idempotent(s in "\\PC{0,24}") {
            let once = sanitize(&s);
            prop_assert_eq!(sanitize(&once), once);
        }
    }
}

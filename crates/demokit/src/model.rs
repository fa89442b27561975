#![forbid(unsafe_code)]

//! Catalog model: groups, items, demos, and tweaks.
//!
//! A [`DemoGroup`] lists items by index. The index is the stable identity of
//! a demo for the life of the process and is what gets persisted; sorted
//! display positions are derived on demand and never stored.
//!
//! A [`Demoable`] is presented through exactly one of four shapes, checked in
//! a fixed order (see [`presentation::choose_strategy`]):
//!
//! 1. [`raw_view`](Demoable::raw_view)
//! 2. [`declarative_view`](Demoable::declarative_view)
//! 3. [`preview_content`](Demoable::preview_content)
//! 4. [`full_controller`](Demoable::full_controller)
//!
//! [`presentation::choose_strategy`]: crate::presentation::choose_strategy

use std::fmt;
use std::rc::Rc;

use demokit_core::text::{capitalize_first_letter, presentation_case, type_title};

use crate::toolkit::Toolkit;

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// How a presented demo can be dismissed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DismissPolicy {
    /// A "Dismiss" button pinned to the bottom of the demo.
    Button,
    /// Double tap anywhere in the demo.
    #[default]
    DoubleTap,
    /// The demo handles dismissal itself.
    None,
}

impl DismissPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            DismissPolicy::Button => "button",
            DismissPolicy::DoubleTap => "double-tap",
            DismissPolicy::None => "none",
        }
    }
}

/// A discrete height stop of a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detent {
    Medium,
    Large,
    /// Fixed height in points.
    Height(f64),
}

impl fmt::Display for Detent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detent::Medium => f.write_str("medium"),
            Detent::Large => f.write_str("large"),
            Detent::Height(h) => write!(f, "{h}pt"),
        }
    }
}

/// Modal presentation style of a controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModalStyle {
    FullScreen,
    PageSheet,
    FormSheet,
    #[default]
    Automatic,
}

impl ModalStyle {
    pub const fn label(self) -> &'static str {
        match self {
            ModalStyle::FullScreen => "full-screen",
            ModalStyle::PageSheet => "page-sheet",
            ModalStyle::FormSheet => "form-sheet",
            ModalStyle::Automatic => "automatic",
        }
    }
}

/// Chrome a demo is presented in.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PresentationStyle {
    /// Present the controller as is.
    #[default]
    FullScreen,
    /// Wrap the controller in a navigation container.
    NavigationWrapped,
    /// Present as a page sheet with the given detents.
    Sheet(Vec<Detent>),
}

/// A navigation bar button descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarButton {
    pub title: String,
}

impl BarButton {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A list row describing one demo of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem {
    pub title: String,
}

impl GroupItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Row for a string-backed item: the raw value with its first letter
    /// capitalized (`"primaryButton"` → `"PrimaryButton"`).
    pub fn from_raw(raw: &str) -> Self {
        Self::new(capitalize_first_letter(raw))
    }
}

/// One named variant of a tweakable demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweakOption {
    /// Stable identifier, used in snapshot names.
    pub identifier: String,
    /// Title shown in the tweak list.
    pub title: String,
}

impl TweakOption {
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
        }
    }

    /// Option for a string-backed tweak: identifier is the raw value, title
    /// is its presentation case (`"largeSize"` → `"Large Size"`).
    pub fn from_raw(raw: &str) -> Self {
        Self::new(raw, presentation_case(raw))
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// A demo with runtime variants.
///
/// `apply_tweak` reconfigures the demo in place. Demos keep their
/// configuration in interior-mutable cells; everything runs on one thread.
pub trait Tweakable {
    fn tweak_count(&self) -> usize;

    /// Option at `index`. Defined for `0 <= index < tweak_count()`.
    fn tweak_at(&self, index: usize) -> TweakOption;

    /// Reconfigure the demo for the option at `index`.
    fn apply_tweak(&self, index: usize);

    /// Whether snapshot runs iterate every tweak.
    fn should_snapshot_all_tweaks(&self) -> bool {
        true
    }

    /// All options in index order.
    fn tweak_options(&self) -> Vec<TweakOption> {
        (0..self.tweak_count()).map(|i| self.tweak_at(i)).collect()
    }
}

/// A single presentable unit.
pub trait Demoable<T: Toolkit> {
    /// Unique identifier, used as snapshot test name. Defaults to the type
    /// name.
    fn identifier(&self) -> String {
        type_title::<Self>()
    }

    /// Title of the presented controller. Defaults to the type name.
    fn title(&self) -> String {
        type_title::<Self>()
    }

    fn dismiss_policy(&self) -> DismissPolicy {
        DismissPolicy::default()
    }

    fn presentation_style(&self) -> PresentationStyle {
        PresentationStyle::default()
    }

    /// Keep the controller's own modal style instead of forcing full screen.
    fn overrides_modal_style(&self) -> bool {
        false
    }

    fn left_bar_buttons(&self) -> Vec<BarButton> {
        Vec::new()
    }

    fn right_bar_buttons(&self) -> Vec<BarButton> {
        Vec::new()
    }

    fn should_snapshot_test(&self) -> bool {
        true
    }

    /// Raw view shape.
    fn raw_view(&self) -> Option<T::View> {
        None
    }

    /// Declarative view shape.
    fn declarative_view(&self) -> Option<T::Content> {
        None
    }

    /// Preview group shape: the group's static preview content.
    fn preview_content(&self) -> Option<T::Content> {
        None
    }

    /// Full controller shape.
    fn full_controller(&self) -> Option<T::Controller> {
        None
    }

    fn as_tweakable(&self) -> Option<&dyn Tweakable> {
        None
    }
}

/// A titled collection of demos addressed by stable index.
pub trait DemoGroup<T: Toolkit> {
    /// Display title. Defaults to the type name.
    fn title(&self) -> String {
        type_title::<Self>()
    }

    fn count(&self) -> usize;

    /// Row for `index`. Defined for `0 <= index < count()`.
    fn item_at(&self, index: usize) -> GroupItem;

    /// Demo for `index`. Defined for `0 <= index < count()`.
    fn demoable_at(&self, index: usize) -> Rc<dyn Demoable<T>>;
}

#![forbid(unsafe_code)]

//! demokit: an in-app catalog for browsing, presenting and tweaking demos.
//!
//! # Key Components
//!
//! - [`Catalog`] - Immutable registry of [`DemoGroup`]s with sorted and sectioned views
//! - [`presentation`] - First-match dispatch from a [`Demoable`] to a controller
//! - [`TweakAffordance`] - Draggable, corner-snapping trigger for the tweak list
//! - [`CatalogRoot`] - Selection, persistence, and resume-on-launch
//! - [`HeadlessToolkit`] - A [`Toolkit`] that renders controllers to text
//!
//! # Example
//!
//! ```
//! use demokit::{CatalogRoot, HeadlessToolkit, sample};
//! use demokit_runtime::NavigationState;
//!
//! let toolkit = HeadlessToolkit::new();
//! let mut root = CatalogRoot::new(sample::catalog(), NavigationState::in_memory());
//! root.activate(&toolkit).unwrap();
//! assert_eq!(root.title(), "Colors");
//!
//! let presentation = root.select_demo(&toolkit, 0).unwrap();
//! assert_eq!(presentation.identifier(), "ColorPrimary");
//! ```

pub mod catalog;
pub mod cli;
pub mod error;
pub mod headless;
pub mod model;
pub mod presentation;
pub mod root;
pub mod sample;
pub mod sorting;
pub mod toolkit;
pub mod tweak_affordance;

#[cfg(test)]
mod testing;

pub use catalog::{Catalog, Sections};
pub use error::{CatalogError, CatalogResult};
pub use headless::{HeadlessController, HeadlessEnvironment, HeadlessToolkit, HeadlessView};
pub use model::{
    BarButton, DemoGroup, Demoable, Detent, DismissPolicy, GroupItem, ModalStyle,
    PresentationStyle, TweakOption, Tweakable,
};
pub use presentation::{Presentation, Strategy, StrategyKind, apply_tweak, choose_strategy, present};
pub use root::{CatalogRoot, GroupSelector};
pub use sorting::{SortedItem, sort_by_title};
pub use toolkit::Toolkit;
pub use tweak_affordance::{TweakAffordance, TweakList, anchor_area};

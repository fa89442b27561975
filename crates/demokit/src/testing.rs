//! Unit-test fixtures for the headless toolkit.

use std::cell::Cell;
use std::rc::Rc;

use crate::catalog::Catalog;
use crate::headless::{HeadlessController, HeadlessToolkit, HeadlessView};
use crate::model::{
    BarButton, DemoGroup, Demoable, DismissPolicy, GroupItem, ModalStyle, PresentationStyle,
    TweakOption, Tweakable,
};

type H = HeadlessToolkit;

/// Group whose items are raw-view demos named `<group>.<item>`.
pub struct FixtureGroup {
    title: String,
    items: Vec<String>,
}

impl FixtureGroup {
    pub fn new(title: &str, items: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl DemoGroup<H> for FixtureGroup {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> GroupItem {
        GroupItem::new(self.items[index].clone())
    }

    fn demoable_at(&self, index: usize) -> Rc<dyn Demoable<H>> {
        Rc::new(
            ShapeDemo::new(&format!("{}.{}", self.title, self.items[index]))
                .raw()
                .titled(&self.items[index]),
        )
    }
}

pub fn fixture_catalog(groups: &[(&str, &[&str])]) -> Catalog<H> {
    Catalog::new(
        groups
            .iter()
            .map(|(title, items)| Box::new(FixtureGroup::new(title, items)) as Box<dyn DemoGroup<H>>)
            .collect(),
    )
}

const FIXTURE_TWEAKS: [&str; 3] = ["small", "largeSize", "dark mode!"];

/// A demo whose shapes and attributes are chosen by builder calls.
pub struct ShapeDemo {
    identifier: String,
    title: String,
    raw: bool,
    declarative: bool,
    preview: bool,
    controller: bool,
    tweakable: bool,
    overrides_modal_style: bool,
    style: PresentationStyle,
    dismiss: DismissPolicy,
    left: Vec<BarButton>,
    right: Vec<BarButton>,
    applied: Cell<Option<usize>>,
}

impl ShapeDemo {
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: identifier.to_string(),
            raw: false,
            declarative: false,
            preview: false,
            controller: false,
            tweakable: false,
            overrides_modal_style: false,
            style: PresentationStyle::default(),
            dismiss: DismissPolicy::default(),
            left: Vec::new(),
            right: Vec::new(),
            applied: Cell::new(None),
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    pub fn declarative(mut self) -> Self {
        self.declarative = true;
        self
    }

    pub fn preview(mut self) -> Self {
        self.preview = true;
        self
    }

    pub fn controller(mut self) -> Self {
        self.controller = true;
        self
    }

    pub fn tweakable(mut self) -> Self {
        self.tweakable = true;
        self
    }

    /// The full controller carries a form-sheet style the demo keeps.
    pub fn overriding_modal_style(mut self) -> Self {
        self.overrides_modal_style = true;
        self
    }

    pub fn styled(mut self, style: PresentationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn dismissed_by(mut self, policy: DismissPolicy) -> Self {
        self.dismiss = policy;
        self
    }

    pub fn with_buttons(mut self, left: Vec<BarButton>, right: Vec<BarButton>) -> Self {
        self.left = left;
        self.right = right;
        self
    }

    pub fn applied(&self) -> Option<usize> {
        self.applied.get()
    }

    /// Built eagerly: a tweak applied after this call does not show.
    fn body(&self) -> HeadlessView {
        match self.applied.get() {
            Some(tweak) => HeadlessView::text(&[self.identifier.as_str(), &format!("tweak {tweak}")]),
            None => HeadlessView::text(&[self.identifier.as_str()]),
        }
    }
}

impl Demoable<H> for ShapeDemo {
    fn identifier(&self) -> String {
        self.identifier.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn dismiss_policy(&self) -> DismissPolicy {
        self.dismiss
    }

    fn presentation_style(&self) -> PresentationStyle {
        self.style.clone()
    }

    fn overrides_modal_style(&self) -> bool {
        self.overrides_modal_style
    }

    fn left_bar_buttons(&self) -> Vec<BarButton> {
        self.left.clone()
    }

    fn right_bar_buttons(&self) -> Vec<BarButton> {
        self.right.clone()
    }

    fn raw_view(&self) -> Option<HeadlessView> {
        self.raw.then(|| self.body())
    }

    fn declarative_view(&self) -> Option<HeadlessView> {
        self.declarative.then(|| self.body())
    }

    fn preview_content(&self) -> Option<HeadlessView> {
        self.preview.then(|| self.body())
    }

    fn full_controller(&self) -> Option<HeadlessController> {
        self.controller.then(|| {
            let controller = HeadlessController::custom(self.identifier.clone(), self.body());
            if self.overrides_modal_style {
                controller.with_modal_style(ModalStyle::FormSheet)
            } else {
                controller
            }
        })
    }

    fn as_tweakable(&self) -> Option<&dyn Tweakable> {
        if self.tweakable { Some(self) } else { None }
    }
}

impl Tweakable for ShapeDemo {
    fn tweak_count(&self) -> usize {
        FIXTURE_TWEAKS.len()
    }

    fn tweak_at(&self, index: usize) -> TweakOption {
        TweakOption::from_raw(FIXTURE_TWEAKS[index])
    }

    fn apply_tweak(&self, index: usize) {
        self.applied.set(Some(index));
    }
}

#![forbid(unsafe_code)]

//! A small catalog for the headless toolkit.
//!
//! Covers every presentable shape, every chrome, tweakable demos, and the
//! snapshot opt-outs. The `demokit` and `demokit-harness` binaries run on it.

use std::cell::Cell;
use std::rc::Rc;

use demokit_core::text::capitalize_first_letter;

use crate::catalog::Catalog;
use crate::headless::{HeadlessController, HeadlessEnvironment, HeadlessToolkit, HeadlessView};
use crate::model::{
    BarButton, DemoGroup, Demoable, Detent, DismissPolicy, GroupItem, ModalStyle,
    PresentationStyle, TweakOption, Tweakable,
};

type H = HeadlessToolkit;

/// The sample catalog.
pub fn catalog() -> Catalog<H> {
    Catalog::new(groups())
}

/// Sample groups in declaration order.
pub fn groups() -> Vec<Box<dyn DemoGroup<H>>> {
    vec![
        Box::new(ScreensGroup),
        Box::new(ComponentsGroup),
        Box::new(ColorsGroup),
    ]
}

fn appearance(env: &HeadlessEnvironment) -> &'static str {
    if env.dark { "dark" } else { "light" }
}

fn width_class(env: &HeadlessEnvironment) -> &'static str {
    if env.compact_width { "compact" } else { "regular" }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

const COLORS: [(&str, &str, &str); 4] = [
    ("primary", "#1E88E5", "#90CAF9"),
    ("secondary", "#8E24AA", "#CE93D8"),
    ("accent", "#FB8C00", "#FFCC80"),
    ("background", "#FFFFFF", "#121212"),
];

pub struct ColorsGroup;

impl DemoGroup<H> for ColorsGroup {
    fn title(&self) -> String {
        "Colors".into()
    }

    fn count(&self) -> usize {
        COLORS.len()
    }

    fn item_at(&self, index: usize) -> GroupItem {
        GroupItem::from_raw(COLORS[index].0)
    }

    fn demoable_at(&self, index: usize) -> Rc<dyn Demoable<H>> {
        let (name, light, dark) = COLORS[index];
        Rc::new(ColorSwatch { name, light, dark })
    }
}

struct ColorSwatch {
    name: &'static str,
    light: &'static str,
    dark: &'static str,
}

impl Demoable<H> for ColorSwatch {
    fn identifier(&self) -> String {
        format!("Color{}", capitalize_first_letter(self.name))
    }

    fn title(&self) -> String {
        capitalize_first_letter(self.name)
    }

    fn raw_view(&self) -> Option<HeadlessView> {
        let (name, light, dark) = (self.name, self.light, self.dark);
        Some(HeadlessView::new(move |env| {
            let hex = if env.dark { dark } else { light };
            vec![format!("swatch {name} {hex}")]
        }))
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

const COMPONENTS: [&str; 4] = ["badge", "button", "card", "avatar"];

pub struct ComponentsGroup;

impl DemoGroup<H> for ComponentsGroup {
    fn title(&self) -> String {
        "Components".into()
    }

    fn count(&self) -> usize {
        COMPONENTS.len()
    }

    fn item_at(&self, index: usize) -> GroupItem {
        GroupItem::from_raw(COMPONENTS[index])
    }

    fn demoable_at(&self, index: usize) -> Rc<dyn Demoable<H>> {
        match index {
            0 => Rc::new(BadgeDemo::default()),
            1 => Rc::new(ButtonDemo),
            2 => Rc::new(CardPreviews),
            _ => Rc::new(AvatarDemo::default()),
        }
    }
}

const BADGE_SIZES: [&str; 3] = ["small", "medium", "largeSize"];

/// A raw-view badge with a size tweak.
#[derive(Default)]
pub struct BadgeDemo {
    size: Rc<Cell<usize>>,
}

impl BadgeDemo {
    /// Index of the applied size.
    pub fn size(&self) -> usize {
        self.size.get()
    }
}

impl Demoable<H> for BadgeDemo {
    fn title(&self) -> String {
        "Badge".into()
    }

    fn raw_view(&self) -> Option<HeadlessView> {
        let size = Rc::clone(&self.size);
        Some(HeadlessView::new(move |env| {
            let label = BADGE_SIZES[size.get()];
            vec![format!("badge ({label}) on {}", appearance(env))]
        }))
    }

    fn as_tweakable(&self) -> Option<&dyn Tweakable> {
        Some(self)
    }
}

impl Tweakable for BadgeDemo {
    fn tweak_count(&self) -> usize {
        BADGE_SIZES.len()
    }

    fn tweak_at(&self, index: usize) -> TweakOption {
        TweakOption::from_raw(BADGE_SIZES[index])
    }

    fn apply_tweak(&self, index: usize) {
        self.size.set(index);
    }
}

/// A declarative button dismissed with a button.
pub struct ButtonDemo;

impl Demoable<H> for ButtonDemo {
    fn title(&self) -> String {
        "Button".into()
    }

    fn dismiss_policy(&self) -> DismissPolicy {
        DismissPolicy::Button
    }

    fn declarative_view(&self) -> Option<HeadlessView> {
        Some(HeadlessView::new(|env| {
            vec![
                format!("button [Continue] {}", appearance(env)),
                format!("layout {}", width_class(env)),
            ]
        }))
    }
}

/// Preview group of cards.
pub struct CardPreviews;

impl Demoable<H> for CardPreviews {
    fn title(&self) -> String {
        "Card".into()
    }

    fn preview_content(&self) -> Option<HeadlessView> {
        Some(HeadlessView::new(|env| {
            let columns = if env.compact_width { 1 } else { 3 };
            vec![
                format!("card previews x{columns}"),
                format!("card surface {}", appearance(env)),
            ]
        }))
    }
}

const AVATAR_SHAPES: [&str; 2] = ["circle", "roundedSquare"];

/// A tweakable avatar whose tweaks are not snapshotted one by one.
#[derive(Default)]
pub struct AvatarDemo {
    shape: Rc<Cell<usize>>,
}

impl Demoable<H> for AvatarDemo {
    fn title(&self) -> String {
        "Avatar".into()
    }

    fn raw_view(&self) -> Option<HeadlessView> {
        let shape = Rc::clone(&self.shape);
        Some(HeadlessView::new(move |_| {
            vec![format!("avatar {}", AVATAR_SHAPES[shape.get()])]
        }))
    }

    fn as_tweakable(&self) -> Option<&dyn Tweakable> {
        Some(self)
    }
}

impl Tweakable for AvatarDemo {
    fn tweak_count(&self) -> usize {
        AVATAR_SHAPES.len()
    }

    fn tweak_at(&self, index: usize) -> TweakOption {
        TweakOption::from_raw(AVATAR_SHAPES[index])
    }

    fn apply_tweak(&self, index: usize) {
        self.shape.set(index);
    }

    fn should_snapshot_all_tweaks(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

const SCREENS: [&str; 3] = ["settings", "filter", "onboarding"];

pub struct ScreensGroup;

impl DemoGroup<H> for ScreensGroup {
    fn title(&self) -> String {
        "Screens".into()
    }

    fn count(&self) -> usize {
        SCREENS.len()
    }

    fn item_at(&self, index: usize) -> GroupItem {
        GroupItem::from_raw(SCREENS[index])
    }

    fn demoable_at(&self, index: usize) -> Rc<dyn Demoable<H>> {
        match index {
            0 => Rc::new(SettingsScreen),
            1 => Rc::new(FilterSheet),
            _ => Rc::new(OnboardingScreen),
        }
    }
}

/// A full controller in a navigation container, keeping its form sheet.
pub struct SettingsScreen;

impl Demoable<H> for SettingsScreen {
    fn title(&self) -> String {
        "Settings".into()
    }

    fn presentation_style(&self) -> PresentationStyle {
        PresentationStyle::NavigationWrapped
    }

    fn overrides_modal_style(&self) -> bool {
        true
    }

    fn right_bar_buttons(&self) -> Vec<BarButton> {
        vec![BarButton::new("Done")]
    }

    fn full_controller(&self) -> Option<HeadlessController> {
        let body = HeadlessView::new(|env| {
            vec![
                "toggle notifications [on]".to_string(),
                format!("theme {}", appearance(env)),
            ]
        });
        Some(
            HeadlessController::custom("SettingsController", body)
                .with_modal_style(ModalStyle::FormSheet),
        )
    }
}

/// A declarative sheet, excluded from snapshots.
pub struct FilterSheet;

impl Demoable<H> for FilterSheet {
    fn title(&self) -> String {
        "Filter".into()
    }

    fn presentation_style(&self) -> PresentationStyle {
        PresentationStyle::Sheet(vec![Detent::Medium, Detent::Large])
    }

    fn should_snapshot_test(&self) -> bool {
        false
    }

    fn declarative_view(&self) -> Option<HeadlessView> {
        Some(HeadlessView::text(&["filter: price", "filter: rating"]))
    }
}

/// A full-screen controller that handles its own dismissal.
pub struct OnboardingScreen;

impl Demoable<H> for OnboardingScreen {
    fn title(&self) -> String {
        "Onboarding".into()
    }

    fn dismiss_policy(&self) -> DismissPolicy {
        DismissPolicy::None
    }

    fn left_bar_buttons(&self) -> Vec<BarButton> {
        vec![BarButton::new("Skip")]
    }

    fn full_controller(&self) -> Option<HeadlessController> {
        Some(HeadlessController::custom(
            "OnboardingController",
            HeadlessView::new(|env| vec![format!("welcome ({})", width_class(env))]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{StrategyKind, choose_strategy};

    #[test]
    fn every_demo_is_presentable_and_unique() {
        let catalog = catalog();
        let mut identifiers = Vec::new();
        for (g, group) in catalog.groups().enumerate() {
            for i in 0..group.count() {
                let demo = catalog.resolve(g, i).unwrap();
                assert!(choose_strategy(&*demo).is_ok(), "{}", demo.identifier());
                identifiers.push(demo.identifier());
            }
        }
        let total = identifiers.len();
        identifiers.sort();
        identifiers.dedup();
        assert_eq!(identifiers.len(), total);
    }

    #[test]
    fn default_identifier_is_type_name() {
        assert_eq!(Demoable::<H>::identifier(&BadgeDemo::default()), "BadgeDemo");
        assert_eq!(Demoable::<H>::identifier(&SettingsScreen), "SettingsScreen");
    }

    #[test]
    fn shapes_cover_all_strategies() {
        let catalog = catalog();
        let kinds: Vec<StrategyKind> = (0..4)
            .map(|i| choose_strategy(&*catalog.resolve(1, i).unwrap()).unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            [
                StrategyKind::RawView,
                StrategyKind::DeclarativeView,
                StrategyKind::PreviewGroup,
                StrategyKind::RawView,
            ]
        );
    }

    #[test]
    fn badge_tweak_changes_render() {
        let badge = BadgeDemo::default();
        let view = Demoable::<H>::raw_view(&badge).unwrap();
        let env = HeadlessEnvironment::default();
        assert_eq!(view.render(&env), ["badge (small) on light"]);
        badge.apply_tweak(2);
        assert_eq!(badge.size(), 2);
        assert_eq!(view.render(&env), ["badge (largeSize) on light"]);
    }
}

#![forbid(unsafe_code)]

//! Presentation dispatch.
//!
//! Turning a demo into something presentable happens in three steps:
//!
//! 1. [`choose_strategy`]: first match over the shapes, in this order:
//!    raw view, declarative view, preview group, full controller.
//! 2. [`configure_presentation`]: dismissal, then title and bar buttons,
//!    then modal style, then the tweak trigger.
//! 3. [`wrap_chrome`]: navigation container or sheet, per the demo's
//!    [`PresentationStyle`].
//!
//! [`present`] runs all three.

use std::fmt;
use std::rc::Rc;

use demokit_runtime::NavigationState;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Demoable, ModalStyle, PresentationStyle, TweakOption};
use crate::toolkit::Toolkit;
use crate::tweak_affordance::{TweakAffordance, TweakList, anchor_area};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How a demo becomes a controller.
pub enum Strategy<T: Toolkit> {
    /// Wrap the view in a plain container.
    RawView(T::View),
    /// Host the content.
    DeclarativeView(T::Content),
    /// Host the group's preview content.
    PreviewGroup(T::Content),
    /// Present the demo's own controller.
    FullController(T::Controller),
}

/// Which [`Strategy`] was chosen, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    RawView,
    DeclarativeView,
    PreviewGroup,
    FullController,
}

impl StrategyKind {
    pub const fn label(self) -> &'static str {
        match self {
            StrategyKind::RawView => "raw-view",
            StrategyKind::DeclarativeView => "declarative-view",
            StrategyKind::PreviewGroup => "preview-group",
            StrategyKind::FullController => "full-controller",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<T: Toolkit> Strategy<T> {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::RawView(_) => StrategyKind::RawView,
            Strategy::DeclarativeView(_) => StrategyKind::DeclarativeView,
            Strategy::PreviewGroup(_) => StrategyKind::PreviewGroup,
            Strategy::FullController(_) => StrategyKind::FullController,
        }
    }

    /// Build the unconfigured controller.
    pub fn into_controller(self, toolkit: &T) -> T::Controller {
        match self {
            Strategy::RawView(view) => toolkit.create_container(view),
            Strategy::DeclarativeView(content) | Strategy::PreviewGroup(content) => {
                toolkit.create_declarative_host(content)
            }
            Strategy::FullController(controller) => controller,
        }
    }
}

impl<T: Toolkit> fmt::Debug for Strategy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Strategy").field(&self.kind()).finish()
    }
}

/// First matching shape wins. A demo with no shape is a configuration bug.
pub fn choose_strategy<T: Toolkit>(demoable: &dyn Demoable<T>) -> CatalogResult<Strategy<T>> {
    if let Some(view) = demoable.raw_view() {
        return Ok(Strategy::RawView(view));
    }
    if let Some(content) = demoable.declarative_view() {
        return Ok(Strategy::DeclarativeView(content));
    }
    if let Some(content) = demoable.preview_content() {
        return Ok(Strategy::PreviewGroup(content));
    }
    if let Some(controller) = demoable.full_controller() {
        return Ok(Strategy::FullController(controller));
    }
    Err(CatalogError::UnpresentableDemo {
        identifier: demoable.identifier(),
    })
}

// ---------------------------------------------------------------------------
// Configuration and chrome
// ---------------------------------------------------------------------------

/// Decorate a freshly built controller for `demoable`.
pub fn configure_presentation<T: Toolkit>(
    toolkit: &T,
    controller: &mut T::Controller,
    demoable: &dyn Demoable<T>,
) {
    toolkit.install_dismissal(controller, demoable.dismiss_policy());
    toolkit.set_title(controller, &demoable.title());
    toolkit.set_bar_buttons(
        controller,
        &demoable.left_bar_buttons(),
        &demoable.right_bar_buttons(),
    );
    if !demoable.overrides_modal_style() {
        toolkit.set_modal_style(controller, ModalStyle::FullScreen);
    }
    if demoable.as_tweakable().is_some() {
        toolkit.attach_tweak_trigger(controller);
    }
}

/// Wrap a configured controller in the chrome `demoable` asks for.
pub fn wrap_chrome<T: Toolkit>(
    toolkit: &T,
    controller: T::Controller,
    demoable: &dyn Demoable<T>,
) -> T::Controller {
    match demoable.presentation_style() {
        PresentationStyle::FullScreen => controller,
        PresentationStyle::NavigationWrapped => {
            let inner_style = toolkit.modal_style(&controller);
            let mut navigation = toolkit.wrap_in_navigation(controller);
            let style = if demoable.overrides_modal_style() {
                inner_style
            } else {
                ModalStyle::FullScreen
            };
            toolkit.set_modal_style(&mut navigation, style);
            navigation
        }
        PresentationStyle::Sheet(detents) => {
            let mut controller = controller;
            toolkit.set_modal_style(&mut controller, ModalStyle::PageSheet);
            toolkit.apply_sheet_detents(&mut controller, &detents);
            controller
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// A demo ready to be shown.
pub struct Presentation<T: Toolkit> {
    demoable: Rc<dyn Demoable<T>>,
    strategy: StrategyKind,
    controller: T::Controller,
    affordance: Option<TweakAffordance>,
}

impl<T: Toolkit> Presentation<T> {
    pub fn demoable(&self) -> &Rc<dyn Demoable<T>> {
        &self.demoable
    }

    pub fn identifier(&self) -> String {
        self.demoable.identifier()
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Outermost controller, chrome included.
    pub fn controller(&self) -> &T::Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut T::Controller {
        &mut self.controller
    }

    pub fn into_controller(self) -> T::Controller {
        self.controller
    }

    /// The tweak trigger, present only for tweakable demos.
    pub fn affordance(&self) -> Option<&TweakAffordance> {
        self.affordance.as_ref()
    }

    pub fn affordance_mut(&mut self) -> Option<&mut TweakAffordance> {
        self.affordance.as_mut()
    }

    /// Open the tweak list, as a tap on the trigger does.
    pub fn open_tweak_list(&mut self, selected: Option<usize>) -> CatalogResult<TweakList> {
        let demoable = Rc::clone(&self.demoable);
        let tweakable = demoable
            .as_tweakable()
            .ok_or_else(|| CatalogError::NotTweakable {
                identifier: demoable.identifier(),
            })?;
        let affordance = self.affordance.as_mut().ok_or(CatalogError::NotTweakable {
            identifier: demoable.identifier(),
        })?;
        Ok(affordance.open_tweak_list(tweakable, selected))
    }

    /// Persist, apply, and close the list.
    pub fn select_tweak(
        &mut self,
        index: usize,
        navigation: &mut NavigationState,
    ) -> CatalogResult<TweakOption> {
        let demoable = Rc::clone(&self.demoable);
        let identifier = demoable.identifier();
        let tweakable = demoable
            .as_tweakable()
            .ok_or_else(|| CatalogError::NotTweakable {
                identifier: identifier.clone(),
            })?;
        match self.affordance.as_mut() {
            Some(affordance) => affordance.select_tweak(&identifier, tweakable, index, navigation),
            None => Err(CatalogError::NotTweakable { identifier }),
        }
    }

    /// Apply a tweak without persisting it.
    pub fn apply_tweak(&self, index: usize) -> CatalogResult<()> {
        apply_tweak(&*self.demoable, index)
    }
}

/// Apply tweak `index` of `demoable` without persisting it.
///
/// Resuming calls this before [`present`] so the controller is built with
/// the tweak already in effect.
pub fn apply_tweak<T: Toolkit>(demoable: &dyn Demoable<T>, index: usize) -> CatalogResult<()> {
    let tweakable = demoable
        .as_tweakable()
        .ok_or_else(|| CatalogError::NotTweakable {
            identifier: demoable.identifier(),
        })?;
    let count = tweakable.tweak_count();
    if index >= count {
        return Err(CatalogError::TweakOutOfRange {
            identifier: demoable.identifier(),
            index,
            count,
        });
    }
    tweakable.apply_tweak(index);
    Ok(())
}

impl<T: Toolkit> fmt::Debug for Presentation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("identifier", &self.demoable.identifier())
            .field("strategy", &self.strategy)
            .field("affordance", &self.affordance.is_some())
            .finish()
    }
}

/// Dispatch, configure, and wrap `demoable`.
pub fn present<T: Toolkit>(
    toolkit: &T,
    demoable: Rc<dyn Demoable<T>>,
) -> CatalogResult<Presentation<T>> {
    let strategy = choose_strategy(&*demoable)?;
    let kind = strategy.kind();
    let mut controller = strategy.into_controller(toolkit);
    configure_presentation(toolkit, &mut controller, &*demoable);

    let affordance = demoable
        .as_tweakable()
        .map(|_| {
            TweakAffordance::new(anchor_area(
                toolkit.bounds(&controller),
                toolkit.safe_area(&controller),
            ))
        });

    let controller = wrap_chrome(toolkit, controller, &*demoable);
    tracing::debug!(
        identifier = %demoable.identifier(),
        strategy = %kind,
        tweakable = affordance.is_some(),
        "demo dispatched"
    );
    Ok(Presentation {
        demoable,
        strategy: kind,
        controller,
        affordance,
    })
}

#![forbid(unsafe_code)]

//! The rendering toolkit seam.
//!
//! The catalog never builds views itself. It asks a [`Toolkit`] to wrap,
//! decorate and lay out controllers, so the same dispatch and snapshot logic
//! runs against a real UI toolkit or the in-crate
//! [`HeadlessToolkit`](crate::headless::HeadlessToolkit).

use demokit_core::geometry::Rect;

use crate::model::{BarButton, Detent, DismissPolicy, ModalStyle};

/// Controller and view primitives consumed by the presentation dispatcher.
pub trait Toolkit {
    /// An imperative view.
    type View;
    /// Declarative view content.
    type Content;
    /// A presentable controller.
    type Controller;

    /// Plain container with `view` filling its safe area.
    fn create_container(&self, view: Self::View) -> Self::Controller;

    /// Host controller for declarative content.
    fn create_declarative_host(&self, content: Self::Content) -> Self::Controller;

    /// Navigation container around `controller`.
    fn wrap_in_navigation(&self, controller: Self::Controller) -> Self::Controller;

    fn apply_sheet_detents(&self, controller: &mut Self::Controller, detents: &[Detent]);

    /// Wire the dismissal affordance for `policy`.
    fn install_dismissal(&self, controller: &mut Self::Controller, policy: DismissPolicy);

    fn set_title(&self, controller: &mut Self::Controller, title: &str);

    fn set_bar_buttons(
        &self,
        controller: &mut Self::Controller,
        left: &[BarButton],
        right: &[BarButton],
    );

    fn modal_style(&self, controller: &Self::Controller) -> ModalStyle;

    fn set_modal_style(&self, controller: &mut Self::Controller, style: ModalStyle);

    /// Overlay the floating tweak trigger on `controller`.
    fn attach_tweak_trigger(&self, controller: &mut Self::Controller);

    /// Full bounds of `controller`'s view, in its own coordinates.
    fn bounds(&self, controller: &Self::Controller) -> Rect;

    /// Safe-area bounds of `controller`'s view, in its own coordinates.
    fn safe_area(&self, controller: &Self::Controller) -> Rect;

    /// Force a layout pass.
    fn layout(&self, controller: &mut Self::Controller);

    /// Globally enable or disable animations.
    fn set_animations_enabled(&self, enabled: bool);

    fn animations_enabled(&self) -> bool;
}

#![forbid(unsafe_code)]

//! A toolkit without a screen.
//!
//! Controllers are plain values that record what the dispatcher did to them
//! and describe themselves as text. Views are closures from a
//! [`HeadlessEnvironment`] to lines, evaluated at describe time, so a tweak
//! applied after dispatch shows up in the next description.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use demokit_core::geometry::{Rect, Size};

use crate::model::{BarButton, Detent, DismissPolicy, ModalStyle};
use crate::toolkit::Toolkit;

/// Height of the status bar area above the safe area.
const DEFAULT_TOP_INSET: f64 = 44.0;
/// Height of the home indicator area below the safe area.
const DEFAULT_BOTTOM_INSET: f64 = 34.0;

// ---------------------------------------------------------------------------
// Environment and views
// ---------------------------------------------------------------------------

/// Traits a headless view renders under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessEnvironment {
    pub dark: bool,
    pub size: Size,
    /// Compact horizontal size class.
    pub compact_width: bool,
}

impl Default for HeadlessEnvironment {
    fn default() -> Self {
        Self {
            dark: false,
            size: Size::new(375.0, 812.0),
            compact_width: true,
        }
    }
}

type RenderFn = dyn Fn(&HeadlessEnvironment) -> Vec<String>;

/// A view rendered lazily to lines of text.
#[derive(Clone)]
pub struct HeadlessView {
    render: Rc<RenderFn>,
}

impl HeadlessView {
    pub fn new(render: impl Fn(&HeadlessEnvironment) -> Vec<String> + 'static) -> Self {
        Self {
            render: Rc::new(render),
        }
    }

    /// A view that always renders the same lines.
    pub fn text(lines: &[&str]) -> Self {
        let lines: Vec<String> = lines.iter().map(|l| (*l).to_string()).collect();
        Self::new(move |_| lines.clone())
    }

    pub fn render(&self, env: &HeadlessEnvironment) -> Vec<String> {
        (self.render)(env)
    }
}

impl fmt::Debug for HeadlessView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessView").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// What built a [`HeadlessController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerKind {
    /// Plain container around a raw view.
    Container,
    /// Host for declarative content.
    DeclarativeHost,
    /// Navigation container around another controller.
    Navigation,
    /// A demo-provided controller.
    Custom(String),
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerKind::Container => f.write_str("container"),
            ControllerKind::DeclarativeHost => f.write_str("declarative-host"),
            ControllerKind::Navigation => f.write_str("navigation"),
            ControllerKind::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// A controller value recording its configuration.
#[derive(Debug, Clone)]
pub struct HeadlessController {
    kind: ControllerKind,
    body: Option<HeadlessView>,
    child: Option<Box<HeadlessController>>,
    title: Option<String>,
    left_buttons: Vec<BarButton>,
    right_buttons: Vec<BarButton>,
    modal_style: ModalStyle,
    detents: Vec<Detent>,
    dismissal: Option<DismissPolicy>,
    tweak_trigger: bool,
    layout_passes: usize,
}

impl HeadlessController {
    fn with_kind(kind: ControllerKind, body: Option<HeadlessView>) -> Self {
        Self {
            kind,
            body,
            child: None,
            title: None,
            left_buttons: Vec::new(),
            right_buttons: Vec::new(),
            modal_style: ModalStyle::default(),
            detents: Vec::new(),
            dismissal: None,
            tweak_trigger: false,
            layout_passes: 0,
        }
    }

    /// A demo-provided controller named `name` showing `body`.
    pub fn custom(name: impl Into<String>, body: HeadlessView) -> Self {
        Self::with_kind(ControllerKind::Custom(name.into()), Some(body))
    }

    #[must_use]
    pub fn with_modal_style(mut self, style: ModalStyle) -> Self {
        self.modal_style = style;
        self
    }

    pub fn kind(&self) -> &ControllerKind {
        &self.kind
    }

    /// Wrapped controller of a navigation container.
    pub fn child(&self) -> Option<&HeadlessController> {
        self.child.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn left_buttons(&self) -> &[BarButton] {
        &self.left_buttons
    }

    pub fn right_buttons(&self) -> &[BarButton] {
        &self.right_buttons
    }

    pub fn modal_style(&self) -> ModalStyle {
        self.modal_style
    }

    pub fn detents(&self) -> &[Detent] {
        &self.detents
    }

    pub fn dismissal(&self) -> Option<DismissPolicy> {
        self.dismissal
    }

    pub fn has_tweak_trigger(&self) -> bool {
        self.tweak_trigger
    }

    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    /// Text description of the controller tree under `env`.
    pub fn describe(&self, env: &HeadlessEnvironment) -> Vec<String> {
        let mut lines = Vec::new();
        self.describe_into(env, 0, &mut lines);
        lines
    }

    fn describe_into(&self, env: &HeadlessEnvironment, depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        out.push(format!("{indent}[{}]", self.kind));
        if let Some(title) = &self.title {
            out.push(format!("{indent}  title: {title}"));
        }
        if !self.left_buttons.is_empty() {
            out.push(format!("{indent}  left: {}", button_titles(&self.left_buttons)));
        }
        if !self.right_buttons.is_empty() {
            out.push(format!("{indent}  right: {}", button_titles(&self.right_buttons)));
        }
        out.push(format!("{indent}  modal: {}", self.modal_style.label()));
        if !self.detents.is_empty() {
            let detents: Vec<String> = self.detents.iter().map(Detent::to_string).collect();
            out.push(format!("{indent}  detents: {}", detents.join(", ")));
        }
        if let Some(policy) = self.dismissal {
            out.push(format!("{indent}  dismiss: {}", policy.label()));
        }
        if self.tweak_trigger {
            out.push(format!("{indent}  tweaks: trigger"));
        }
        if let Some(body) = &self.body {
            for line in body.render(env) {
                out.push(format!("{indent}  | {line}"));
            }
        }
        if let Some(child) = &self.child {
            child.describe_into(env, depth + 1, out);
        }
    }
}

fn button_titles(buttons: &[BarButton]) -> String {
    let titles: Vec<&str> = buttons.iter().map(|b| b.title.as_str()).collect();
    titles.join(", ")
}

// ---------------------------------------------------------------------------
// Toolkit
// ---------------------------------------------------------------------------

/// In-memory [`Toolkit`] with a fixed screen size.
///
/// Every toolkit call is appended to a journal so callers can check the
/// order in which a controller was configured.
#[derive(Debug)]
pub struct HeadlessToolkit {
    screen: Size,
    top_inset: f64,
    bottom_inset: f64,
    left_inset: f64,
    right_inset: f64,
    animations: Cell<bool>,
    journal: RefCell<Vec<String>>,
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessToolkit {
    /// A phone-sized screen.
    pub fn new() -> Self {
        Self::with_screen(Size::new(375.0, 812.0), DEFAULT_TOP_INSET, DEFAULT_BOTTOM_INSET)
    }

    pub fn with_screen(screen: Size, top_inset: f64, bottom_inset: f64) -> Self {
        Self {
            screen,
            top_inset,
            bottom_inset,
            left_inset: 0.0,
            right_inset: 0.0,
            animations: Cell::new(true),
            journal: RefCell::new(Vec::new()),
        }
    }

    /// Landscape-style leading and trailing safe-area insets.
    #[must_use]
    pub fn with_side_insets(mut self, left: f64, right: f64) -> Self {
        self.left_inset = left;
        self.right_inset = right;
        self
    }

    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Calls made so far, oldest first.
    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }

    fn record(&self, entry: String) {
        self.journal.borrow_mut().push(entry);
    }
}

impl Toolkit for HeadlessToolkit {
    type View = HeadlessView;
    type Content = HeadlessView;
    type Controller = HeadlessController;

    fn create_container(&self, view: HeadlessView) -> HeadlessController {
        self.record("create_container".into());
        HeadlessController::with_kind(ControllerKind::Container, Some(view))
    }

    fn create_declarative_host(&self, content: HeadlessView) -> HeadlessController {
        self.record("create_declarative_host".into());
        HeadlessController::with_kind(ControllerKind::DeclarativeHost, Some(content))
    }

    fn wrap_in_navigation(&self, controller: HeadlessController) -> HeadlessController {
        self.record("wrap_in_navigation".into());
        let mut nav = HeadlessController::with_kind(ControllerKind::Navigation, None);
        nav.child = Some(Box::new(controller));
        nav
    }

    fn apply_sheet_detents(&self, controller: &mut HeadlessController, detents: &[Detent]) {
        self.record(format!("apply_sheet_detents:{}", detents.len()));
        controller.detents = detents.to_vec();
    }

    fn install_dismissal(&self, controller: &mut HeadlessController, policy: DismissPolicy) {
        self.record(format!("install_dismissal:{}", policy.label()));
        controller.dismissal = Some(policy);
    }

    fn set_title(&self, controller: &mut HeadlessController, title: &str) {
        self.record("set_title".into());
        controller.title = Some(title.to_string());
    }

    fn set_bar_buttons(
        &self,
        controller: &mut HeadlessController,
        left: &[BarButton],
        right: &[BarButton],
    ) {
        self.record("set_bar_buttons".into());
        controller.left_buttons = left.to_vec();
        controller.right_buttons = right.to_vec();
    }

    fn modal_style(&self, controller: &HeadlessController) -> ModalStyle {
        controller.modal_style
    }

    fn set_modal_style(&self, controller: &mut HeadlessController, style: ModalStyle) {
        self.record(format!("set_modal_style:{}", style.label()));
        controller.modal_style = style;
    }

    fn attach_tweak_trigger(&self, controller: &mut HeadlessController) {
        self.record("attach_tweak_trigger".into());
        controller.tweak_trigger = true;
    }

    fn bounds(&self, _controller: &HeadlessController) -> Rect {
        Rect::from_size(self.screen)
    }

    fn safe_area(&self, _controller: &HeadlessController) -> Rect {
        Rect::new(
            self.left_inset,
            self.top_inset,
            (self.screen.width - self.left_inset - self.right_inset).max(0.0),
            (self.screen.height - self.top_inset - self.bottom_inset).max(0.0),
        )
    }

    fn layout(&self, controller: &mut HeadlessController) {
        controller.layout_passes += 1;
        if let Some(child) = controller.child.as_mut() {
            child.layout_passes += 1;
        }
    }

    fn set_animations_enabled(&self, enabled: bool) {
        self.record(format!("set_animations_enabled:{enabled}"));
        self.animations.set(enabled);
    }

    fn animations_enabled(&self) -> bool {
        self.animations.get()
    }
}

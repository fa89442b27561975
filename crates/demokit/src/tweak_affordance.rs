#![forbid(unsafe_code)]

//! The floating tweak trigger.
//!
//! A small button overlaid on a presented tweakable demo. It rests on one of
//! four corner anchors, can be dragged anywhere, and on release is flung to
//! the corner nearest to where it would have coasted to:
//!
//! ```text
//!   Idle(corner) ──touch down on trigger──► Dragging
//!        ▲                                     │
//!        │                          release    │
//!        │        ┌── no movement: Tap ────────┤
//!        │        ▼                            ▼
//!        └──── Settling(corner) ◄── project + nearest corner
//! ```
//!
//! A tap opens the tweak list. Touches that miss the trigger pass through to
//! the demo underneath.

use std::time::Duration;

use demokit_core::animation::{Animation, SettleAnimation};
use demokit_core::geometry::{Point, Rect, Size, Vector};
use demokit_core::physics::{
    DECELERATION_RATE_NORMAL, SpringParameters, nearest_corner, project_point,
    relative_velocity_vector,
};
use demokit_runtime::NavigationState;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Detent, TweakOption, Tweakable};

/// Title of the tweak list sheet.
pub const TWEAK_LIST_TITLE: &str = "Tweaks";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Geometry and physics of the trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordanceConfig {
    /// Side length of the square trigger.
    pub button_size: f64,
    /// Gap between the trigger and the edges of its [`anchor_area`].
    pub margin: f64,
    pub deceleration_rate: f64,
    pub spring: SpringParameters,
    /// Movement below which a release counts as a tap.
    pub tap_slop: f64,
}

impl Default for AffordanceConfig {
    fn default() -> Self {
        Self {
            button_size: 48.0,
            margin: 16.0,
            deceleration_rate: DECELERATION_RATE_NORMAL,
            spring: SpringParameters::from_response(1.0, 0.4),
            tap_slop: 10.0,
        }
    }
}

impl AffordanceConfig {
    /// Distance from the bounds' edges to an anchor (the trigger's center).
    pub fn anchor_inset(&self) -> f64 {
        self.margin + self.button_size / 2.0
    }
}

// ---------------------------------------------------------------------------
// Corners
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Anchor order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub const fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomLeft => 2,
            Corner::BottomRight => 3,
        }
    }
}

/// Region the anchors are inset from: the view's own leading and trailing
/// edges, and the top and bottom of its safe area.
pub fn anchor_area(bounds: Rect, safe_area: Rect) -> Rect {
    Rect::new(
        bounds.min_x(),
        safe_area.min_y(),
        bounds.size.width,
        safe_area.size.height,
    )
}

/// Trigger centers for each corner of a bounds rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerAnchors {
    points: [Point; 4],
}

impl CornerAnchors {
    /// Corners of `bounds` shrunk by `inset` on every side.
    pub fn new(bounds: Rect, inset: f64) -> Self {
        let inner = bounds.inset(inset);
        Self {
            points: [
                Point::new(inner.min_x(), inner.min_y()),
                Point::new(inner.max_x(), inner.min_y()),
                Point::new(inner.min_x(), inner.max_y()),
                Point::new(inner.max_x(), inner.max_y()),
            ],
        }
    }

    pub fn point(&self, corner: Corner) -> Point {
        self.points[corner.index()]
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Corner whose anchor is closest to `point`.
    pub fn nearest(&self, point: Point) -> (Corner, Point) {
        match nearest_corner(point, &self.points) {
            Some((index, anchor)) => (Corner::ALL[index], anchor),
            None => (Corner::BottomRight, self.point(Corner::BottomRight)),
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum TriggerState {
    Idle {
        corner: Corner,
    },
    Dragging {
        /// Corner the trigger was resting on or heading to.
        corner: Corner,
        /// Trigger center minus touch location.
        offset: Vector,
        start: Point,
        center: Point,
        moved: bool,
    },
    Settling {
        corner: Corner,
        animation: SettleAnimation,
    },
}

/// Public view of the trigger's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Idle,
    Dragging,
    Settling,
}

/// Where a touch lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTest {
    /// On the trigger; the overlay handles it.
    Trigger,
    /// Anywhere else; forwarded to the demo.
    PassThrough,
}

/// Result of lifting a finger that started on the trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No real movement; open the tweak list.
    Tap,
    /// A drag; the trigger is settling onto `corner`.
    Settle { corner: Corner, projected: Point },
}

/// Options shown when the trigger is tapped.
#[derive(Debug, Clone, PartialEq)]
pub struct TweakList {
    pub title: String,
    pub rows: Vec<TweakOption>,
    pub detents: Vec<Detent>,
    /// Row of the currently applied tweak, if known.
    pub selected: Option<usize>,
}

/// Draggable, corner-snapping tweak trigger.
#[derive(Debug, Clone)]
pub struct TweakAffordance {
    config: AffordanceConfig,
    anchors: CornerAnchors,
    state: TriggerState,
    list_open: bool,
}

impl TweakAffordance {
    /// Trigger resting bottom-right within `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, AffordanceConfig::default())
    }

    pub fn with_config(bounds: Rect, config: AffordanceConfig) -> Self {
        Self {
            anchors: CornerAnchors::new(bounds, config.anchor_inset()),
            config,
            state: TriggerState::Idle {
                corner: Corner::BottomRight,
            },
            list_open: false,
        }
    }

    pub fn config(&self) -> &AffordanceConfig {
        &self.config
    }

    pub fn anchors(&self) -> &CornerAnchors {
        &self.anchors
    }

    pub fn phase(&self) -> TriggerPhase {
        match self.state {
            TriggerState::Idle { .. } => TriggerPhase::Idle,
            TriggerState::Dragging { .. } => TriggerPhase::Dragging,
            TriggerState::Settling { .. } => TriggerPhase::Settling,
        }
    }

    /// Corner the trigger rests on, or is heading to.
    pub fn corner(&self) -> Corner {
        match self.state {
            TriggerState::Idle { corner }
            | TriggerState::Dragging { corner, .. }
            | TriggerState::Settling { corner, .. } => corner,
        }
    }

    /// Current trigger center.
    pub fn center(&self) -> Point {
        match self.state {
            TriggerState::Idle { corner } => self.anchors.point(corner),
            TriggerState::Dragging { center, .. } => center,
            TriggerState::Settling { animation, .. } => animation.position(),
        }
    }

    /// Current trigger frame.
    pub fn frame(&self) -> Rect {
        Rect::centered(self.center(), Size::square(self.config.button_size))
    }

    pub fn hit_test(&self, point: Point) -> HitTest {
        if self.frame().contains(point) {
            HitTest::Trigger
        } else {
            HitTest::PassThrough
        }
    }

    /// New [`anchor_area`]. The trigger snaps to its corner's new anchor
    /// unless a drag is in progress.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.anchors = CornerAnchors::new(bounds, self.config.anchor_inset());
        if let TriggerState::Settling { corner, .. } = self.state {
            self.state = TriggerState::Idle { corner };
        }
    }

    /// Finger down. Captures the touch when it lands on the trigger, which
    /// also interrupts a running settle.
    pub fn touch_down(&mut self, point: Point) -> HitTest {
        let hit = self.hit_test(point);
        if hit == HitTest::Trigger {
            let center = self.center();
            self.state = TriggerState::Dragging {
                corner: self.corner(),
                offset: center - point,
                start: point,
                center,
                moved: false,
            };
        }
        hit
    }

    pub fn touch_moved(&mut self, point: Point) {
        let slop = self.config.tap_slop;
        if let TriggerState::Dragging {
            offset,
            start,
            center,
            moved,
            ..
        } = &mut self.state
        {
            *center = point + *offset;
            if start.distance(point) > slop {
                *moved = true;
            }
        }
    }

    /// Finger up with the gesture's final `velocity` in points per second.
    ///
    /// Returns `None` if no drag was in progress.
    pub fn touch_up(&mut self, point: Point, velocity: Vector) -> Option<Release> {
        self.touch_moved(point);
        let TriggerState::Dragging {
            corner,
            center,
            moved,
            ..
        } = self.state
        else {
            return None;
        };

        if !moved {
            self.settle(center, corner, Vector::ZERO);
            return Some(Release::Tap);
        }

        let projected = project_point(center, velocity, self.config.deceleration_rate);
        let (target, _) = self.anchors.nearest(projected);
        tracing::debug!(?target, x = projected.x, y = projected.y, "tweak trigger released");
        self.settle(center, target, velocity);
        Some(Release::Settle {
            corner: target,
            projected,
        })
    }

    /// The gesture was interrupted; return to the previous corner.
    pub fn touch_cancelled(&mut self) {
        if let TriggerState::Dragging { corner, center, .. } = self.state {
            self.settle(center, corner, Vector::ZERO);
        }
    }

    /// Advance the settle animation.
    pub fn tick(&mut self, dt: Duration) {
        if let TriggerState::Settling { corner, animation } = &mut self.state {
            animation.tick(dt);
            if animation.is_complete() {
                self.state = TriggerState::Idle { corner: *corner };
            }
        }
    }

    fn settle(&mut self, from: Point, corner: Corner, velocity: Vector) {
        let to = self.anchors.point(corner);
        if from == to {
            self.state = TriggerState::Idle { corner };
            return;
        }
        let relative = relative_velocity_vector(velocity, from, to);
        self.state = TriggerState::Settling {
            corner,
            animation: SettleAnimation::new(from, to, self.config.spring, relative),
        };
    }

    // -----------------------------------------------------------------------
    // Tweak list
    // -----------------------------------------------------------------------

    pub fn is_tweak_list_open(&self) -> bool {
        self.list_open
    }

    /// Open the tweak list for `tweakable`.
    pub fn open_tweak_list(&mut self, tweakable: &dyn Tweakable, selected: Option<usize>) -> TweakList {
        self.list_open = true;
        TweakList {
            title: TWEAK_LIST_TITLE.to_string(),
            rows: tweakable.tweak_options(),
            detents: vec![Detent::Medium, Detent::Large],
            selected,
        }
    }

    pub fn close_tweak_list(&mut self) {
        self.list_open = false;
    }

    /// Persist `index`, apply it to the demo, and close the list.
    ///
    /// A storage failure is logged; the tweak is applied either way.
    pub fn select_tweak(
        &mut self,
        identifier: &str,
        tweakable: &dyn Tweakable,
        index: usize,
        navigation: &mut NavigationState,
    ) -> CatalogResult<TweakOption> {
        let count = tweakable.tweak_count();
        if index >= count {
            return Err(CatalogError::TweakOutOfRange {
                identifier: identifier.to_string(),
                index,
                count,
            });
        }
        let option = tweakable.tweak_at(index);
        if let Err(error) = navigation.set_selected_tweak(Some(index)) {
            tracing::warn!(identifier, index, %error, "failed to persist tweak selection");
        }
        tweakable.apply_tweak(index);
        self.list_open = false;
        tracing::debug!(identifier, index, tweak = %option.identifier, "tweak applied");
        Ok(option)
    }
}

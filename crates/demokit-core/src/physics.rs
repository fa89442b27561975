#![forbid(unsafe_code)]

//! Drag-release physics for the corner-snapping tweak trigger.
//!
//! # Model
//!
//! On release the trigger's resting place is chosen from where it *would*
//! stop if it kept decelerating like a native scroll view:
//!
//! ```text
//! distance = (velocity / 1000) * rate / (1 - rate)
//! ```
//!
//! with `velocity` in points per second and `rate` the per-millisecond
//! deceleration factor. The projected point is snapped to the nearest of the
//! four corner anchors, then a spring carries the trigger there.
//!
//! Springs are specified the design-tool way (damping ratio + response time)
//! and converted to physical parameters with unit mass:
//!
//! ```text
//! stiffness = (2π / response)²
//! damping   = 4π · ratio / response
//! ```

use std::f64::consts::PI;

use crate::geometry::{Point, Vector};

/// Per-millisecond deceleration of a normal scroll view.
pub const DECELERATION_RATE_NORMAL: f64 = 0.998;

/// Distance travelled by a body released at `initial_velocity` (points per
/// second) that decelerates by `deceleration_rate` every millisecond until it
/// stops.
#[inline]
pub fn project(initial_velocity: f64, deceleration_rate: f64) -> f64 {
    (initial_velocity / 1000.0) * deceleration_rate / (1.0 - deceleration_rate)
}

/// Project a release point along both axes.
pub fn project_point(position: Point, velocity: Vector, deceleration_rate: f64) -> Point {
    Point::new(
        position.x + project(velocity.dx, deceleration_rate),
        position.y + project(velocity.dy, deceleration_rate),
    )
}

/// Index and position of the candidate nearest to `point`.
///
/// Ties keep the earliest candidate. Returns `None` only for an empty slice.
pub fn nearest_corner(point: Point, corners: &[Point]) -> Option<(usize, Point)> {
    let mut best: Option<(usize, Point, f64)> = None;
    for (index, corner) in corners.iter().enumerate() {
        let distance = point.distance(*corner);
        match best {
            Some((_, _, min)) if distance >= min => {}
            _ => best = Some((index, *corner, distance)),
        }
    }
    best.map(|(index, corner, _)| (index, corner))
}

/// Velocity expressed as a fraction of the remaining distance per second.
///
/// Spring animations run over normalized progress (0 → 1), so an absolute
/// release velocity has to be scaled by the distance still to travel.
#[inline]
pub fn relative_velocity(velocity: f64, from: f64, to: f64) -> f64 {
    let remaining = to - from;
    if remaining == 0.0 {
        return 0.0;
    }
    velocity / remaining
}

/// Per-axis relative velocity towards `to`.
pub fn relative_velocity_vector(velocity: Vector, from: Point, to: Point) -> Vector {
    Vector::new(
        relative_velocity(velocity.dx, from.x, to.x),
        relative_velocity(velocity.dy, from.y, to.y),
    )
}

/// Physical spring parameters (unit mass unless stated otherwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParameters {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringParameters {
    /// Build a spring from a damping ratio (0 = undamped, 1 = critically
    /// damped) and a response time in seconds.
    ///
    /// Non-positive responses are clamped to a millisecond to keep the
    /// stiffness finite.
    pub fn from_response(damping_ratio: f64, response: f64) -> Self {
        let response = response.max(0.001);
        let stiffness = (2.0 * PI / response).powi(2);
        let damping = 4.0 * PI * damping_ratio / response;
        Self {
            mass: 1.0,
            stiffness,
            damping,
        }
    }

    /// Undamped angular frequency `ω₀ = √(k/m)`.
    #[inline]
    pub fn angular_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `ζ = c / (2√(km))`.
    #[inline]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringParameters {
    /// Critically damped, 0.4 s response: the trigger's settle spring.
    fn default() -> Self {
        Self::from_response(1.0, 0.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn project_matches_closed_form() {
        // 1000 pt/s with rate 0.998 → 1 * 0.998 / 0.002 = 499
        let d = project(1000.0, DECELERATION_RATE_NORMAL);
        assert!((d - 499.0).abs() < 1e-6, "got {d}");
        assert_eq!(project(0.0, DECELERATION_RATE_NORMAL), 0.0);
        assert!(project(-1000.0, DECELERATION_RATE_NORMAL) < 0.0);
    }

    #[test]
    fn stronger_deceleration_projects_shorter() {
        let normal = project(800.0, DECELERATION_RATE_NORMAL);
        let fast = project(800.0, 0.99);
        assert!(fast < normal);
    }

    #[test]
    fn project_point_moves_along_velocity() {
        let p = project_point(
            Point::new(100.0, 100.0),
            Vector::new(1000.0, -1000.0),
            DECELERATION_RATE_NORMAL,
        );
        assert!((p.x - 599.0).abs() < 1e-6);
        assert!((p.y + 399.0).abs() < 1e-6);
    }

    #[test]
    fn nearest_corner_picks_top_right() {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
        ];
        let (index, corner) = nearest_corner(Point::new(90.0, 10.0), &corners).unwrap();
        assert_eq!(index, 1);
        assert_eq!(corner, Point::new(100.0, 0.0));
    }

    #[test]
    fn nearest_corner_tie_keeps_first() {
        let corners = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let (index, _) = nearest_corner(Point::new(50.0, 0.0), &corners).unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn nearest_corner_empty_is_none() {
        assert!(nearest_corner(Point::ZERO, &[]).is_none());
    }

    #[test]
    fn relative_velocity_zero_distance() {
        assert_eq!(relative_velocity(500.0, 10.0, 10.0), 0.0);
        assert_eq!(relative_velocity(500.0, 0.0, 250.0), 2.0);
        assert_eq!(relative_velocity(-500.0, 250.0, 0.0), 2.0);
    }

    #[test]
    fn spring_from_response_formulas() {
        let spring = SpringParameters::from_response(1.0, 0.4);
        let expected_stiffness = (2.0 * PI / 0.4).powi(2);
        let expected_damping = 4.0 * PI / 0.4;
        assert!((spring.stiffness - expected_stiffness).abs() < EPS);
        assert!((spring.damping - expected_damping).abs() < EPS);
        assert_eq!(spring.mass, 1.0);
    }

    #[test]
    fn damping_ratio_round_trips() {
        for ratio in [0.3, 0.7, 1.0, 1.5] {
            let spring = SpringParameters::from_response(ratio, 0.5);
            assert!(
                (spring.damping_ratio() - ratio).abs() < 1e-9,
                "ratio {ratio} came back as {}",
                spring.damping_ratio()
            );
        }
    }

    #[test]
    fn zero_response_is_clamped() {
        let spring = SpringParameters::from_response(1.0, 0.0);
        assert!(spring.stiffness.is_finite());
        assert!(spring.damping.is_finite());
    }
}

#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! The tweak trigger settles onto a corner with a damped spring. The spring
//! is solved analytically so the position at any elapsed time is exact and
//! independent of tick granularity: ticking 1 × 400 ms lands on the same
//! value as 400 × 1 ms.

use std::time::Duration;

use crate::geometry::{Point, Vector};
use crate::physics::SpringParameters;

/// Displacement (in normalized progress) below which a spring is at rest.
const REST_DISPLACEMENT: f64 = 1e-3;

/// Speed (in normalized progress per second) below which a spring is at rest.
const REST_VELOCITY: f64 = 1e-2;

/// Hard stop for springs that would otherwise ring for a long time.
const MAX_SETTLE: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation.
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current normalized progress. Springs may overshoot past 1.0.
    fn value(&self) -> f64;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Spring
// ---------------------------------------------------------------------------

/// Damped harmonic oscillator driving normalized progress from 0.0 to 1.0.
///
/// `initial_velocity` is expressed in progress per second (see
/// [`relative_velocity`](crate::physics::relative_velocity)).
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    params: SpringParameters,
    initial_velocity: f64,
    elapsed: Duration,
}

impl Spring {
    /// Create a spring at progress 0.0 heading for 1.0.
    pub fn new(params: SpringParameters, initial_velocity: f64) -> Self {
        Self {
            params,
            initial_velocity,
            elapsed: Duration::ZERO,
        }
    }

    /// Spring parameters.
    pub fn params(&self) -> SpringParameters {
        self.params
    }

    /// Displacement from the target and its time derivative at `t` seconds.
    ///
    /// Displacement starts at -1.0 (progress 0.0) and decays towards 0.0.
    fn state_at(&self, t: f64) -> (f64, f64) {
        let omega = self.params.angular_frequency();
        let zeta = self.params.damping_ratio();
        let x0 = -1.0;
        let v0 = self.initial_velocity;

        if (zeta - 1.0).abs() < 1e-9 {
            // Critically damped: x = (A + Bt) e^{-ωt}
            let a = x0;
            let b = v0 + omega * x0;
            let decay = (-omega * t).exp();
            let x = (a + b * t) * decay;
            let v = (b - omega * (a + b * t)) * decay;
            (x, v)
        } else if zeta < 1.0 {
            // Underdamped: x = e^{-ζωt}(A cos ω_d t + B sin ω_d t)
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let a = x0;
            let b = (v0 + zeta * omega * x0) / omega_d;
            let decay = (-zeta * omega * t).exp();
            let (sin, cos) = (omega_d * t).sin_cos();
            let x = decay * (a * cos + b * sin);
            let v = decay
                * ((b * omega_d - zeta * omega * a) * cos - (a * omega_d + zeta * omega * b) * sin);
            (x, v)
        } else {
            // Overdamped: x = C1 e^{r1 t} + C2 e^{r2 t}
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        }
    }

    /// Progress velocity at the current time.
    pub fn velocity(&self) -> f64 {
        self.state_at(self.elapsed.as_secs_f64()).1
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        if self.elapsed >= MAX_SETTLE {
            return true;
        }
        let (x, v) = self.state_at(self.elapsed.as_secs_f64());
        x.abs() < REST_DISPLACEMENT && v.abs() < REST_VELOCITY
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            return 1.0;
        }
        1.0 + self.state_at(self.elapsed.as_secs_f64()).0
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

// ---------------------------------------------------------------------------
// SettleAnimation
// ---------------------------------------------------------------------------

/// Carries a point to a target with one spring per axis.
///
/// Each axis gets its own initial relative velocity so a diagonal fling keeps
/// its momentum on both axes.
#[derive(Debug, Clone, Copy)]
pub struct SettleAnimation {
    from: Point,
    to: Point,
    x: Spring,
    y: Spring,
}

impl SettleAnimation {
    /// Animate from `from` to `to`, starting with `relative_velocity` (per
    /// axis, in progress per second).
    pub fn new(from: Point, to: Point, params: SpringParameters, relative_velocity: Vector) -> Self {
        Self {
            from,
            to,
            x: Spring::new(params, relative_velocity.dx),
            y: Spring::new(params, relative_velocity.dy),
        }
    }

    /// Target point.
    pub fn target(&self) -> Point {
        self.to
    }

    /// Current interpolated position.
    pub fn position(&self) -> Point {
        if self.is_complete() {
            return self.to;
        }
        Point::new(
            self.from.x + (self.to.x - self.from.x) * self.x.value(),
            self.from.y + (self.to.y - self.from.y) * self.y.value(),
        )
    }
}

impl Animation for SettleAnimation {
    fn tick(&mut self, dt: Duration) {
        self.x.tick(dt);
        self.y.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.x.is_complete() && self.y.is_complete()
    }

    /// Mean progress of both axes.
    fn value(&self) -> f64 {
        (self.x.value() + self.y.value()) / 2.0
    }

    fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn spring_starts_at_zero() {
        let spring = Spring::new(SpringParameters::default(), 0.0);
        assert!(spring.value().abs() < 1e-12);
        assert!(!spring.is_complete());
    }

    #[test]
    fn critically_damped_spring_settles_without_overshoot() {
        let mut spring = Spring::new(SpringParameters::default(), 0.0);
        let mut last = 0.0;
        for _ in 0..200 {
            spring.tick(ms(10));
            let v = spring.value();
            assert!(v <= 1.0 + 1e-9, "critically damped spring overshot: {v}");
            assert!(v + 1e-9 >= last, "progress went backwards: {last} -> {v}");
            last = v;
        }
        assert!(spring.is_complete());
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let params = SpringParameters::from_response(0.3, 0.4);
        let mut spring = Spring::new(params, 0.0);
        let mut peak: f64 = 0.0;
        for _ in 0..100 {
            spring.tick(ms(5));
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0, "expected overshoot, peak was {peak}");
    }

    #[test]
    fn overdamped_spring_converges() {
        let params = SpringParameters::from_response(2.0, 0.4);
        let mut spring = Spring::new(params, 0.0);
        spring.tick(Duration::from_secs(5));
        assert!(spring.is_complete());
    }

    #[test]
    fn tick_granularity_does_not_matter() {
        let mut coarse = Spring::new(SpringParameters::default(), 3.0);
        let mut fine = Spring::new(SpringParameters::default(), 3.0);
        coarse.tick(ms(150));
        for _ in 0..150 {
            fine.tick(ms(1));
        }
        assert!((coarse.value() - fine.value()).abs() < 1e-12);
    }

    #[test]
    fn initial_velocity_speeds_up_progress() {
        let mut idle = Spring::new(SpringParameters::default(), 0.0);
        let mut flung = Spring::new(SpringParameters::default(), 8.0);
        idle.tick(ms(50));
        flung.tick(ms(50));
        assert!(flung.value() > idle.value());
    }

    #[test]
    fn reset_restarts() {
        let mut spring = Spring::new(SpringParameters::default(), 0.0);
        spring.tick(Duration::from_secs(3));
        assert!(spring.is_complete());
        spring.reset();
        assert!(!spring.is_complete());
    }

    #[test]
    fn settle_lands_exactly_on_target() {
        let mut settle = SettleAnimation::new(
            Point::new(10.0, 10.0),
            Point::new(300.0, 600.0),
            SpringParameters::default(),
            Vector::ZERO,
        );
        assert_eq!(settle.position(), Point::new(10.0, 10.0));
        settle.tick(Duration::from_secs(3));
        assert!(settle.is_complete());
        assert_eq!(settle.position(), Point::new(300.0, 600.0));
    }

    #[test]
    fn settle_midway_is_between_endpoints() {
        let mut settle = SettleAnimation::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            SpringParameters::default(),
            Vector::ZERO,
        );
        settle.tick(ms(100));
        let p = settle.position();
        assert!(p.x > 0.0 && p.x < 100.0, "x out of range: {}", p.x);
        assert!(p.y > 0.0 && p.y < 100.0, "y out of range: {}", p.y);
    }
}

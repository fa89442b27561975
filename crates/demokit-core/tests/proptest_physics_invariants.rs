//! Property-based invariant tests for the drag-release physics.
//!
//! 1. Nearest corner is never farther than any other candidate.
//! 2. Nearest corner of a candidate is the candidate itself.
//! 3. Projection is odd in velocity and zero at rest.
//! 4. Projection grows with speed.
//! 5. Spring parameters are finite and positive for sane inputs.
//! 6. A critically damped settle always ends exactly on its target.

use std::time::Duration;

use demokit_core::animation::{Animation, SettleAnimation};
use demokit_core::geometry::{Point, Vector};
use demokit_core::physics::{
    DECELERATION_RATE_NORMAL, SpringParameters, nearest_corner, project, relative_velocity_vector,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn point_strategy() -> impl Strategy<Value = Point> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn corners_strategy() -> impl Strategy<Value = [Point; 4]> {
    (10.0f64..1500.0, 10.0f64..1500.0).prop_map(|(w, h)| {
        [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(0.0, h),
            Point::new(w, h),
        ]
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Nearest corner
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nearest_corner_is_minimal(p in point_strategy(), corners in corners_strategy()) {
        let (index, chosen) = nearest_corner(p, &corners).expect("four candidates");
        prop_assert_eq!(corners[index], chosen);
        let best = p.distance(chosen);
        for corner in &corners {
            prop_assert!(
                best <= p.distance(*corner) + 1e-9,
                "corner {:?} is closer to {:?} than chosen {:?}",
                corner, p, chosen
            );
        }
    }

    #[test]
    fn nearest_corner_of_corner_is_itself(corners in corners_strategy(), pick in 0usize..4) {
        let (index, chosen) = nearest_corner(corners[pick], &corners).expect("four candidates");
        prop_assert_eq!(index, pick);
        prop_assert_eq!(chosen, corners[pick]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Projection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn projection_is_odd(v in -5000.0f64..5000.0) {
        let forward = project(v, DECELERATION_RATE_NORMAL);
        let backward = project(-v, DECELERATION_RATE_NORMAL);
        prop_assert!((forward + backward).abs() < 1e-9);
    }

    #[test]
    fn projection_monotonic_in_speed(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
        let (slow, fast) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            project(slow, DECELERATION_RATE_NORMAL) <= project(fast, DECELERATION_RATE_NORMAL)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5–6. Springs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn spring_parameters_finite(ratio in 0.05f64..3.0, response in 0.01f64..5.0) {
        let spring = SpringParameters::from_response(ratio, response);
        prop_assert!(spring.stiffness.is_finite() && spring.stiffness > 0.0);
        prop_assert!(spring.damping.is_finite() && spring.damping > 0.0);
    }

    #[test]
    fn settle_ends_on_target(
        from in point_strategy(),
        to in point_strategy(),
        vx in -3000.0f64..3000.0,
        vy in -3000.0f64..3000.0,
    ) {
        let velocity = relative_velocity_vector(Vector::new(vx, vy), from, to);
        let mut settle = SettleAnimation::new(from, to, SpringParameters::default(), velocity);
        settle.tick(Duration::from_secs(10));
        prop_assert!(settle.is_complete());
        prop_assert_eq!(settle.position(), to);
    }
}

#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Points are in the overlay's coordinate space (points, origin at top-left,
//! y grows downwards), matching the coordinates a gesture recognizer reports.

use std::ops::{Add, Sub};

/// A location in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Offset this point by a vector.
    #[inline]
    pub fn offset(&self, by: Vector) -> Point {
        Point::new(self.x + by.dx, self.y + by.dy)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        self.offset(rhs)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    /// Vector pointing from `rhs` to `self`.
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A displacement or velocity in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Length of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A square of the given side length.
    #[inline]
    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// An axis-aligned rectangle used for overlay bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// A rectangle of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom edges exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Shrink the rectangle by `inset` on every side. Never produces a
    /// negative size; an over-inset collapses onto the center.
    pub fn inset(&self, inset: f64) -> Rect {
        let width = (self.size.width - 2.0 * inset).max(0.0);
        let height = (self.size.height - 2.0 * inset).max(0.0);
        Rect::centered(self.center(), Size::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn point_vector_arithmetic() {
        let p = Point::new(10.0, 20.0);
        let v = Vector::new(1.5, -2.0);
        assert_eq!(p + v, Point::new(11.5, 18.0));
        assert_eq!(p - v, Point::new(8.5, 22.0));
        assert_eq!(Point::new(4.0, 4.0) - Point::new(1.0, 2.0), Vector::new(3.0, 2.0));
    }

    #[test]
    fn rect_contains_excludes_far_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(29.9, 29.9)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(15.0, 30.0)));
        assert!(!r.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn rect_centered_round_trips_center() {
        let r = Rect::centered(Point::new(50.0, 60.0), Size::square(48.0));
        assert_eq!(r.center(), Point::new(50.0, 60.0));
        assert_eq!(r.min_x(), 26.0);
        assert_eq!(r.max_y(), 84.0);
    }

    #[test]
    fn rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 100.0);
        let inner = r.inset(20.0);
        assert_eq!(inner.size.width, 0.0);
        assert_eq!(inner.size.height, 60.0);
        assert_eq!(inner.center(), r.center());
        assert!(inner.is_empty());
    }
}

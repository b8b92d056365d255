//! Displacements between points.
//!
//! The engine mostly works on point rings; a `Vec2` is what lies
//! between two of those points: an edge direction, an offset normal,
//! the gap between two boundaries. Two products do nearly all of the
//! work. The dot product projects one displacement onto another, which
//! is how the collinear-overlap branch of segment intersection finds
//! its first contact and how dissolve measures collinearity. The cross
//! product reads off turn direction, which is what separates shapes
//! from holes and steers the outline walker at a crossing.

use num_traits::Float;
use std::ops::{Div, Mul, Sub};

/// A displacement in the plane.
///
/// Obtained by subtracting one [`super::Point2`] from another; rarely
/// constructed directly outside of unit-vector math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a displacement from its components.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Projects this displacement onto another (the dot product).
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// The signed parallelogram area spanned with `other` (the 2D
    /// cross product).
    ///
    /// Positive when `other` turns counter-clockwise from `self`, zero
    /// when the two are collinear. Taken between consecutive ring
    /// edges, the sign is the winding of the ring: positive at a
    /// shape's starting vertex, negative at a hole's. The same sign
    /// drives `is_left` and the walker's `more_clockwise` choice.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - other.x * self.y
    }

    /// The squared length, for comparisons that never need the root.
    ///
    /// Dissolve's collinearity test runs entirely in these units,
    /// comparing `dot` squared against the product of the two edges'
    /// squared lengths.
    #[inline]
    pub fn length_squared(self) -> F {
        self.x * self.x + self.y * self.y
    }

    /// The length of the displacement.
    #[inline]
    pub fn length(self) -> F {
        self.length_squared().sqrt()
    }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn div(self, scalar: F) -> Self {
        Vec2::new(self.x / scalar, self.y / scalar)
    }
}

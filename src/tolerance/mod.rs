//! Tolerance configuration and tolerant geometric predicates.
//!
//! Floating-point coordinates are never compared exactly; every
//! near-equality decision in the engine goes through a single scalar
//! tolerance, carried explicitly. No hidden epsilons are used.

mod predicates;

pub use predicates::{is_left, match_point, more_clockwise};

use num_traits::Float;

/// The tolerance pair used by all geometric predicates.
///
/// `eps` merges points and absorbs rounding error; the default of `1e-6`
/// connects anything closer than a thousandth of a unit, a convenient
/// choice when coordinates represent millimeters. Squared-area
/// comparisons (such as the parallelism test in segment intersection)
/// use [`Tolerance::eps2`].
///
/// A [`crate::shape::Shapes`] collection carries its tolerance and
/// threads it through every operation; all shapes in one collection see
/// the same `eps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<F> {
    /// Distance below which two coordinates are considered equal.
    pub eps: F,
}

impl<F: Float> Tolerance<F> {
    /// Creates a tolerance with the given merge distance.
    #[inline]
    pub fn new(eps: F) -> Self {
        Self { eps }
    }

    /// The squared tolerance, used for area-unit comparisons.
    #[inline]
    pub fn eps2(self) -> F {
        self.eps * self.eps
    }
}

impl<F: Float> Default for Tolerance<F> {
    fn default() -> Self {
        Self {
            eps: F::from(1e-6).unwrap(),
        }
    }
}

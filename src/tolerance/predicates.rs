//! Tolerant point and turn predicates.

use crate::primitives::Point2;
use num_traits::Float;

/// Recognizes when `a` is close enough to `b` to be treated as the same
/// point.
///
/// Both coordinates must agree within `eps`. The relation is reflexive
/// and symmetric, and approximately transitive at the `eps` scale.
#[inline]
pub fn match_point<F: Float>(a: Point2<F>, b: Point2<F>, eps: F) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

/// Determines whether `a` lies on the left of the directed line from `b`
/// to `c`.
///
/// Defined by the sign of the cross product `(c - b) x (a - b)`;
/// collinear points count as left.
#[inline]
pub fn is_left<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    (c - b).cross(a - b) >= F::zero()
}

/// Confirms that `c` is more clockwise than `d`, looking out from `b`.
///
/// Collinear candidates count as more clockwise; the outline walker
/// relies on that tie-break to stay on the outer hull when two rings
/// share a straight stretch.
#[inline]
pub fn more_clockwise<F: Float>(b: Point2<F>, c: Point2<F>, d: Point2<F>) -> bool {
    (c - b).cross(d - b) >= F::zero()
}

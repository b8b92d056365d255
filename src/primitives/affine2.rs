//! The affine map behind collection transforms.
//!
//! Callers describe the move the way a machinist would: pick the
//! collection up at a pivot, rotate and scale it, and set it down at a
//! new position. That whole move collapses into one 2x3 matrix, applied
//! to a ring as a couple of multiply-adds per vertex.

use super::Point2;
use num_traits::Float;

/// A pivot-rotate-scale-translate map.
///
/// Stored as the 2x3 matrix
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// whose left 2x2 block carries the rotation and scale and whose last
/// column carries the translation. Points map as
/// `(a*x + b*y + tx, c*x + d*y + ty)`.
///
/// # Example
///
/// ```
/// use polygonal::primitives::{Affine2, Point2};
/// use std::f64::consts::FRAC_PI_2;
///
/// // Quarter turn about (1, 1), set down 10 units to the right.
/// let m: Affine2<f64> = Affine2::about(
///     Point2::new(1.0, 1.0),
///     Point2::new(11.0, 1.0),
///     FRAC_PI_2,
///     1.0,
/// );
/// // (2, 1) sits one unit right of the pivot; after the turn it sits
/// // one unit above the drop-off point.
/// let p = m.apply(Point2::new(2.0, 1.0));
/// assert!((p.x - 11.0).abs() < 1e-12);
/// assert!((p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2<F> {
    /// Rotation/scale block, row one.
    pub a: F,
    /// Rotation/scale block, row one.
    pub b: F,
    /// Rotation/scale block, row two.
    pub c: F,
    /// Rotation/scale block, row two.
    pub d: F,
    /// Translation, x component.
    pub tx: F,
    /// Translation, y component.
    pub ty: F,
}

impl<F: Float> Affine2<F> {
    /// Builds the map that carries the pivot `at` onto `to`, rotating
    /// by `theta` (radians, counter-clockwise positive) and scaling by
    /// `scale` around the pivot on the way.
    ///
    /// Positive scales preserve winding: shapes stay counter-clockwise
    /// and holes stay clockwise through the transform.
    pub fn about(at: Point2<F>, to: Point2<F>, theta: F, scale: F) -> Self {
        let a = scale * theta.cos();
        let c = scale * theta.sin();
        let (b, d) = (-c, a);
        Self {
            a,
            b,
            c,
            d,
            tx: to.x - a * at.x - b * at.y,
            ty: to.y - c * at.x - d * at.y,
        }
    }

    /// Applies the map to one point.
    #[inline]
    pub fn apply(self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }
}

//! Axis-aligned bounding boxes.
//!
//! Every shape carries the exact box around its ring. The union driver
//! leans on these boxes twice: `reorder` sorts the whole collection by
//! box corners, and every pairwise step opens with a box-overlap reject
//! so that polygons which cannot possibly meet are skipped without
//! touching a single edge.

use super::{min_max, Point2};
use num_traits::Float;

/// The axis-aligned box around a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Lower-left corner.
    pub min: Point2<F>,
    /// Upper-right corner.
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// The box spanned by a pair of points, given in any order.
    #[inline]
    pub fn from_corners(a: Point2<F>, b: Point2<F>) -> Self {
        let (x0, x1) = min_max(a.x, b.x);
        let (y0, y1) = min_max(a.y, b.y);
        Self {
            min: Point2::new(x0, y0),
            max: Point2::new(x1, y1),
        }
    }

    /// The box around a sequence of points, or `None` when the
    /// sequence is empty.
    ///
    /// Rationalisation computes a shape's box with this, and crossing
    /// enumeration recomputes it after snapping moves vertices, keeping
    /// the stored box exact over the ring at all times.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<F>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bb.min.x = bb.min.x.min(p.x);
            bb.min.y = bb.min.y.min(p.y);
            bb.max.x = bb.max.x.max(p.x);
            bb.max.y = bb.max.y.max(p.y);
        }
        Some(bb)
    }

    /// The box grown by `margin` on every side.
    ///
    /// Overlap and containment pre-tests run on boxes grown by the
    /// merge tolerance, so contact within ε of a box edge is not
    /// rejected before the segment arithmetic gets a look at it.
    #[inline]
    pub fn expand(self, margin: F) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// The smallest box covering both boxes.
    ///
    /// Folding this across a collection yields the collection's own
    /// bounding box.
    pub fn union(self, other: Self) -> Self {
        let mut bb = self;
        bb.min.x = bb.min.x.min(other.min.x);
        bb.min.y = bb.min.y.min(other.min.y);
        bb.max.x = bb.max.x.max(other.max.x);
        bb.max.y = bb.max.y.max(other.max.y);
        bb
    }

    /// Whether the point falls within the box.
    ///
    /// The cheap pre-test in front of the ray-crossing containment
    /// count; a point outside the box cannot be inside the ring.
    #[inline]
    pub fn contains(self, p: Point2<F>) -> bool {
        !(p.x < self.min.x || p.x > self.max.x || p.y < self.min.y || p.y > self.max.y)
    }

    /// Whether two boxes overlap; touching edges count.
    ///
    /// The pairwise combiner and the hole trimmer skip a pair outright
    /// when their ε-expanded boxes fail this test.
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        !(self.max.x < other.min.x
            || other.max.x < self.min.x
            || self.max.y < other.min.y
            || other.max.y < self.min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_from_corners_any_order() {
        let bb: Aabb2<f64> = Aabb2::from_corners(pt(3.0, 1.0), pt(-1.0, 4.0));
        assert_eq!(bb.min, pt(-1.0, 1.0));
        assert_eq!(bb.max, pt(3.0, 4.0));
        assert_eq!(bb, Aabb2::from_corners(pt(-1.0, 4.0), pt(3.0, 1.0)));
    }

    #[test]
    fn test_from_points_is_exact() {
        let ring = vec![pt(1.0, 2.0), pt(3.0, 1.0), pt(2.0, 4.0)];
        let bb = Aabb2::from_points(ring).unwrap();
        assert_eq!(bb.min, pt(1.0, 1.0));
        assert_eq!(bb.max, pt(3.0, 4.0));

        let none: Option<Aabb2<f64>> = Aabb2::from_points(vec![]);
        assert!(none.is_none());
    }

    #[test]
    fn test_expand_adds_slack() {
        let bb: Aabb2<f64> =
            Aabb2::from_corners(pt(0.0, 0.0), pt(1.0, 1.0)).expand(0.5);
        assert_eq!(bb.min, pt(-0.5, -0.5));
        assert_eq!(bb.max, pt(1.5, 1.5));
    }

    #[test]
    fn test_union_folds() {
        let a: Aabb2<f64> = Aabb2::from_corners(pt(0.0, 0.0), pt(1.0, 1.0));
        let b = Aabb2::from_corners(pt(2.0, -1.0), pt(3.0, 0.5));
        let u = a.union(b);
        assert_eq!(u.min, pt(0.0, -1.0));
        assert_eq!(u.max, pt(3.0, 1.0));
    }

    #[test]
    fn test_contains() {
        let bb: Aabb2<f64> = Aabb2::from_corners(pt(0.0, 0.0), pt(2.0, 2.0));
        assert!(bb.contains(pt(1.0, 1.0)));
        assert!(bb.contains(pt(2.0, 0.0))); // box edges count
        assert!(!bb.contains(pt(1.0, 2.5)));
        assert!(!bb.contains(pt(-0.1, 1.0)));
    }

    #[test]
    fn test_overlaps() {
        let a: Aabb2<f64> = Aabb2::from_corners(pt(0.0, 0.0), pt(2.0, 2.0));
        let b = Aabb2::from_corners(pt(1.0, 1.0), pt(3.0, 3.0));
        let far = Aabb2::from_corners(pt(5.0, 5.0), pt(6.0, 6.0));
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
        assert!(!a.overlaps(far));
        // Edge-sharing squares must not be rejected.
        let touching = Aabb2::from_corners(pt(2.0, 0.0), pt(4.0, 2.0));
        assert!(a.overlaps(touching));
    }
}

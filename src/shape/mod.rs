//! Polygon shapes and collections.
//!
//! A [`Shape`] is a simple closed ring of vertices with an implicit edge
//! joining the last point back to the first. Counter-clockwise rings are
//! positive regions; clockwise rings are holes. A [`Shapes`] value owns
//! an ordered list of shapes together with the tolerance every geometric
//! decision is made under.
//!
//! Construction always goes through rationalisation, which rotates the
//! ring so the first vertex is the leftmost-lowest one. The boolean
//! engine depends on that: after [`Shapes::reorder`], the first vertex of
//! the first shape is guaranteed to lie on the outer hull of the union.

use crate::error::PolygonError;
use crate::hull;
use crate::primitives::{Aabb2, Affine2, Point2, Segment2};
use crate::tolerance::{match_point, Tolerance};
use num_traits::Float;
use std::cmp::Ordering;

/// A simple polygon: at least three vertices, no self-intersection.
///
/// Simplicity is a caller contract; the engine does not verify it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape<F> {
    /// Consecutive points on the perimeter. An implicit edge joins the
    /// last point to the first. The first vertex is canonical: lowest x,
    /// then lowest y.
    pub ps: Vec<Point2<F>>,
    /// The exact bounding box of `ps`.
    pub bb: Aabb2<F>,
    /// Whether the ring is clockwise, representing a hole rather than an
    /// additive region.
    pub hole: bool,
    /// Opaque provenance string. Fresh shapes get a counter stamp;
    /// derived shapes extend it, e.g. `"(3+5)"` for a merged outline or
    /// `"3^5.1"` for a hole that the merge produced.
    pub tag: String,
}

impl<F: Float> Shape<F> {
    /// Builds a normalised shape from a point sequence.
    ///
    /// Adjacent vertices closer than `eps` are merged, the ring is
    /// rotated so the leftmost-lowest vertex comes first, the bounding
    /// box is computed, and the orientation flag is read off the signed
    /// turn at the starting vertex. Fails when fewer than three distinct
    /// points remain.
    pub fn rationalize(
        pts: &[Point2<F>],
        tag: String,
        eps: F,
    ) -> Result<Self, PolygonError> {
        let mut ps: Vec<Point2<F>> = Vec::with_capacity(pts.len());
        for &v in pts {
            if let Some(&last) = ps.last() {
                if match_point(last, v, eps) {
                    continue;
                }
            }
            ps.push(v);
        }
        while ps.len() > 1 && match_point(ps[0], *ps.last().unwrap(), eps) {
            ps.pop();
        }
        if ps.len() < 3 {
            return Err(PolygonError::TooFewPoints { got: ps.len() });
        }

        let bb = Aabb2::from_points(ps.iter().copied()).unwrap();

        let mut zpt = 0;
        for (j, v) in ps.iter().enumerate() {
            let z = ps[zpt];
            if v.x < z.x || (v.x == z.x && v.y < z.y) {
                zpt = j;
            }
        }
        ps.rotate_left(zpt);

        let d1 = ps[0] - ps[ps.len() - 1];
        let d2 = ps[1] - ps[0];
        let hole = d1.cross(d2) < F::zero();

        Ok(Self { ps, bb, hole, tag })
    }

    /// Returns the bounding box of the shape.
    #[inline]
    pub fn bb(&self) -> Aabb2<F> {
        self.bb
    }

    /// Computes the signed area of the ring using the shoelace formula.
    ///
    /// Positive for counter-clockwise rings (shapes), negative for
    /// clockwise rings (holes).
    pub fn signed_area(&self) -> F {
        let mut area = F::zero();
        let n = self.ps.len();
        for i in 0..n {
            let j = (i + 1) % n;
            area = area + self.ps[i].x * self.ps[j].y;
            area = area - self.ps[j].x * self.ps[i].y;
        }
        area / (F::one() + F::one())
    }

    /// Eliminates collinear and coincident vertices from the ring.
    ///
    /// A vertex is dropped when its neighbours already describe the same
    /// boundary without it. Returns whether anything was removed. The
    /// ring can fall below three vertices; callers decide whether that
    /// invalidates the shape.
    pub fn dissolve(&mut self, eps: F) -> bool {
        let mut dissolved = false;
        let mut i = 0;
        while i < self.ps.len() {
            let n = self.ps.len();
            if n == 0 {
                break;
            }
            let a = self.ps[i % n];
            let bi = (i + 1) % n;
            let b = self.ps[bi];
            let c = self.ps[(i + 2) % n];
            let ac = c - a;
            let ab = b - a;
            let dot = ac.dot(ab);
            let cmp = ac.length_squared() * ab.length_squared();
            if (dot * dot - cmp).abs() < eps {
                self.ps.remove(bi);
                dissolved = true;
            } else {
                i += 1;
            }
        }
        dissolved
    }

    /// Tests whether a point is inside the ring.
    ///
    /// Odd/even ray-crossing with a horizontal ray; the half-open vertex
    /// rule keeps the count consistent when the ray passes through a
    /// vertex. Points on the boundary may report either way.
    pub fn contains(&self, p: Point2<F>, eps: F) -> bool {
        if !self.bb.expand(eps).contains(p) {
            return false;
        }
        let n = self.ps.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.ps[i];
            let vj = self.ps[j];
            if ((vi.y > p.y) != (vj.y > p.y))
                && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Tests whether a point is strictly interior to the ring.
    ///
    /// Like [`Shape::contains`], but a point within `eps` of any vertex
    /// or edge is reported as not inside. The containment classifier
    /// uses this to keep tangent contact from reading as enclosure.
    pub fn interior_contains(&self, p: Point2<F>, eps: F) -> bool {
        if !self.bb.expand(eps).contains(p) {
            return false;
        }
        let n = self.ps.len();
        let e2 = eps * eps;
        for i in 0..n {
            let seg = Segment2::new(self.ps[i], self.ps[(i + 1) % n]);
            if seg.distance_squared_to_point(p) <= e2 {
                return false;
            }
        }
        self.contains(p, eps)
    }

    /// Returns the convex hull of the ring's vertices in CCW order.
    pub fn hull(&self) -> Vec<Point2<F>> {
        hull::convex_hull(&self.ps)
    }

    /// Rotates the ring in place so vertex `k` comes first.
    ///
    /// Leaves the canonical-start invariant broken; only walk setup uses
    /// this, and every walk result is rationalised afterwards.
    pub(crate) fn rotate_to(&mut self, k: usize) {
        let n = self.ps.len();
        if n > 0 {
            self.ps.rotate_left(k % n);
        }
    }

    /// Recomputes the bounding box from the current vertices.
    pub(crate) fn recompute_bb(&mut self) {
        if let Some(bb) = Aabb2::from_points(self.ps.iter().copied()) {
            self.bb = bb;
        }
    }

    /// The sort key used by [`Shapes::reorder`]: ascending min corner,
    /// then descending max corner.
    pub(crate) fn order_cmp(&self, other: &Self) -> Ordering {
        self.bb
            .min
            .x
            .partial_cmp(&other.bb.min.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                self.bb
                    .min
                    .y
                    .partial_cmp(&other.bb.min.y)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                other
                    .bb
                    .max
                    .x
                    .partial_cmp(&self.bb.max.x)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                other
                    .bb
                    .max
                    .y
                    .partial_cmp(&self.bb.max.y)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

/// An ordered collection of polygon shapes.
///
/// Cloning a collection yields a fully independent deep copy.
///
/// # Example
///
/// ```
/// use polygonal::shape::Shapes;
/// use polygonal::primitives::Point2;
///
/// let mut ss: Shapes<f64> = Shapes::new();
/// ss.append(&[
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ])
/// .unwrap();
/// assert_eq!(ss.len(), 1);
/// assert!(!ss.p[0].hole);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Shapes<F> {
    /// The shapes, in insertion order until [`Shapes::reorder`] or
    /// [`Shapes::union`] rearranges them.
    pub p: Vec<Shape<F>>,
    pub(crate) tol: Tolerance<F>,
    pub(crate) counter: usize,
}

impl<F: Float> Shapes<F> {
    /// Creates an empty collection with the default tolerance.
    pub fn new() -> Self {
        Self::with_tolerance(Tolerance::default())
    }

    /// Creates an empty collection with an explicit tolerance.
    ///
    /// Every shape appended to the collection is rationalised and later
    /// combined under this tolerance. Changing tolerances between
    /// operations on the same collection is not supported.
    pub fn with_tolerance(tol: Tolerance<F>) -> Self {
        Self {
            p: Vec::new(),
            tol,
            counter: 0,
        }
    }

    /// The tolerance this collection operates under.
    #[inline]
    pub fn tolerance(&self) -> Tolerance<F> {
        self.tol
    }

    /// Number of shapes in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.p.len()
    }

    /// Whether the collection holds no shapes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    /// Stamps a fresh provenance tag.
    pub(crate) fn next_tag(&mut self) -> String {
        let tag = self.counter.to_string();
        self.counter += 1;
        tag
    }

    /// Appends a polygon shape built from consecutive points.
    ///
    /// The new shape is rationalised: its first vertex is the
    /// leftmost-lowest one, and its hole flag reflects the winding of
    /// the supplied points. Fails when fewer than three distinct points
    /// are supplied.
    pub fn append(&mut self, pts: &[Point2<F>]) -> Result<(), PolygonError> {
        let tag = self.next_tag();
        let shape = Shape::rationalize(pts, tag, self.tol.eps)?;
        self.p.push(shape);
        Ok(())
    }

    /// Chainable variant of [`Shapes::append`] that panics on failure.
    ///
    /// # Panics
    ///
    /// Panics when the points do not form a polygon. Call
    /// [`Shapes::append`] for error control.
    ///
    /// # Example
    ///
    /// ```
    /// use polygonal::shape::Shapes;
    /// use polygonal::primitives::Point2;
    ///
    /// let ss: Shapes<f64> = Shapes::new()
    ///     .builder(&[
    ///         Point2::new(0.0, 0.0),
    ///         Point2::new(1.0, 0.0),
    ///         Point2::new(0.0, 1.0),
    ///     ]);
    /// assert_eq!(ss.len(), 1);
    /// ```
    pub fn builder(mut self, pts: &[Point2<F>]) -> Self {
        match self.append(pts) {
            Ok(()) => self,
            Err(e) => panic!("builder: {}", e),
        }
    }

    /// Reverses the orientation of shape `i` without changing its
    /// starting point, toggling its hole flag.
    ///
    /// Applying it twice restores the shape exactly.
    pub fn invert(&mut self, i: usize) -> Result<(), PolygonError> {
        let len = self.p.len();
        let s = self
            .p
            .get_mut(i)
            .ok_or(PolygonError::InvalidIndex { index: i, len })?;
        s.hole = !s.hole;
        s.ps[1..].reverse();
        Ok(())
    }

    /// Appends clones of every shape in `other`, without unioning.
    pub fn add(&mut self, other: &Shapes<F>) {
        self.p.extend(other.p.iter().cloned());
    }

    /// Returns the bounding box of the whole collection, or `None` when
    /// it is empty.
    pub fn bb(&self) -> Option<Aabb2<F>> {
        let mut it = self.p.iter();
        let first = it.next()?.bb;
        Some(it.fold(first, |acc, s| acc.union(s.bb)))
    }

    /// Sorts the shapes left to right, bottom to top: ascending min x,
    /// then ascending min y, then descending max x and max y.
    ///
    /// Afterwards, the first vertex of the first shape is guaranteed to
    /// lie on the outer hull of the union of all shapes.
    pub fn reorder(&mut self) {
        self.p.sort_by(|a, b| a.order_cmp(b));
    }

    /// Returns a transformed copy of the collection.
    ///
    /// Each point moves to `to + rotate(theta) * scale * (p - at)`:
    /// `at` is the pivot, `to` its image, `theta` a counter-clockwise
    /// angle in radians. Shapes that collapse under the transform (for
    /// example at scale zero) are dropped.
    pub fn transform(&self, at: Point2<F>, to: Point2<F>, theta: F, scale: F) -> Shapes<F> {
        let m = Affine2::about(at, to, theta, scale);
        let mut out = Shapes::with_tolerance(self.tol);
        out.counter = self.counter;
        for s in &self.p {
            let pts: Vec<Point2<F>> = s.ps.iter().map(|&p| m.apply(p)).collect();
            if let Ok(shape) = Shape::rationalize(&pts, s.tag.clone(), self.tol.eps) {
                out.p.push(shape);
            }
        }
        out
    }
}

impl<F: Float> Default for Shapes<F> {
    fn default() -> Self {
        Self::new()
    }
}

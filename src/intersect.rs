//! Segment intersection with canonical endpoint handling.
//!
//! This is the primitive underneath the whole boolean engine. It answers
//! whether two segments meet, and if so where, with answers that stay
//! stable under floating-point error: endpoint touches are anchored to
//! the first segment's own vertices, and computed crossings snap onto
//! nearby endpoints. Downstream code depends on that canonicalisation to
//! recognise one logical crossing as one exact point.

use crate::primitives::{min_max, Point2};
use crate::tolerance::{is_left, match_point, Tolerance};
use num_traits::Float;

/// The result of intersecting segment AB with segment CD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<F> {
    /// The canonical shared point, if the segments meet.
    pub at: Option<Point2<F>>,
    /// Whether A lies on the left of the directed line C->D.
    pub left: bool,
    /// Whether C lies on the left of the directed line A->B.
    pub hold: bool,
}

/// Determines if the line segments (a->b) and (c->d) intersect, and
/// where.
///
/// The branches run in a deliberate order: bounding boxes and endpoint
/// matches are tested before any algebra, because they give canonical,
/// tolerance-stable answers. Two conventions matter to callers:
///
/// - Segments that share their start point (`a` matches `c`) report no
///   intersection. Ring walks meet this case at every vertex they have
///   already handled, and must ignore it.
/// - An endpoint touch reports the matched vertex of AB (never of CD),
///   so repeated queries against the same edge see one anchored point.
///
/// # Example
///
/// ```
/// use polygonal::intersect::intersect;
/// use polygonal::primitives::Point2;
/// use polygonal::tolerance::Tolerance;
///
/// let tol = Tolerance::default();
/// let x = intersect(
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
///     Point2::new(2.0, 0.0),
///     tol,
/// );
/// assert_eq!(x.at, Some(Point2::new(1.0, 1.0)));
/// ```
pub fn intersect<F: Float>(
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
    d: Point2<F>,
    tol: Tolerance<F>,
) -> Crossing<F> {
    let eps = tol.eps;
    let left = is_left(a, c, d);
    let hold = is_left(c, a, b);
    let miss = Crossing { at: None, left, hold };

    let d_ab = b - a;
    let d_cd = d - c;
    let (ab_min_x, ab_max_x) = min_max(a.x, b.x);
    let (ab_min_y, ab_max_y) = min_max(a.y, b.y);
    let (cd_min_x, cd_max_x) = min_max(c.x, d.x);
    let (cd_min_y, cd_max_y) = min_max(c.y, d.y);

    // Segment bounding boxes that fail to overlap by more than eps on
    // any axis cannot meet.
    if ab_min_x > cd_max_x + eps
        || ab_max_x < cd_min_x - eps
        || ab_min_y > cd_max_y + eps
        || ab_max_y < cd_min_y - eps
    {
        return miss;
    }

    // Endpoint canonicalisation, before any linear algebra. A shared
    // start is ignored; other endpoint touches anchor to AB's vertex.
    if match_point(a, c, eps) {
        return miss;
    }
    if match_point(b, d, eps) || match_point(b, c, eps) {
        return Crossing { at: Some(b), left, hold };
    }
    if match_point(a, d, eps) {
        return Crossing { at: Some(a), left, hold };
    }

    // Overlap of the two boxes, grown by eps on degenerate axes so a
    // horizontal or vertical contact is not lost to rounding.
    let half = eps / (F::one() + F::one());
    let mut bb0 = Point2::new(ab_min_x.max(cd_min_x), ab_min_y.max(cd_min_y));
    let mut bb1 = Point2::new(ab_max_x.min(cd_max_x), ab_max_y.min(cd_max_y));
    if (bb1.x - bb0.x).abs() < eps {
        bb0.x = bb0.x - half;
        bb1.x = bb1.x + half;
    }
    if (bb1.y - bb0.y).abs() < eps {
        bb0.y = bb0.y - half;
        bb1.y = bb1.y + half;
    }

    let r = d_ab.cross(d_cd);
    if r.abs() > tol.eps2() {
        // Non-parallel: solve the two line equations, special-casing
        // near-vertical segments to avoid dividing by a tiny run.
        let mut at;
        if d_ab.x.abs() < eps {
            let m_cd = d_cd.y / d_cd.x;
            let c_cd = d.y - m_cd * d.x;
            at = Point2::new(a.x, c_cd + m_cd * a.x);
        } else if d_cd.x.abs() < eps {
            let m_ab = d_ab.y / d_ab.x;
            let c_ab = a.y - m_ab * a.x;
            at = Point2::new(d.x, c_ab + m_ab * d.x);
        } else {
            let m_ab = d_ab.y / d_ab.x;
            let m_cd = d_cd.y / d_cd.x;
            let c_ab = a.y - m_ab * a.x;
            let c_cd = d.y - m_cd * d.x;
            let x = -(c_ab - c_cd) / (m_ab - m_cd);
            at = Point2::new(x, c_ab + m_ab * x);
        }
        if match_point(a, at, eps) {
            at = a;
        } else if match_point(b, at, eps) {
            at = b;
        }
        if bb0.x > at.x || bb1.x < at.x || bb0.y > at.y || bb1.y < at.y {
            return miss;
        }
        return Crossing { at: Some(at), left, hold };
    }

    // Parallel. Not collinear means no contact at all.
    let colinear = (a.y - d.y) * d_ab.x - (a.x - d.x) * d_ab.y;
    if colinear.abs() > eps {
        return miss;
    }

    // Collinear overlap: project C and D onto AB and take the first
    // contact point forward along AB. When neither projects within AB,
    // AB lies interior to CD and contact starts at A itself.
    let len = d_ab.length();
    let u = d_ab / len;
    let tc = (c - a).dot(u);
    let td = (d - a).dot(u);
    let mut at = a;
    let mut best = F::infinity();
    if tc > -eps && tc < len + eps && tc < best {
        at = c;
        best = tc;
    }
    if td > -eps && td < len + eps && td < best {
        at = d;
    }
    Crossing { at: Some(at), left, hold }
}

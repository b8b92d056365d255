//! Containment classification from a crossing enumeration.

use crate::hull::convex_hull_indices;
use crate::primitives::Point2;
use crate::shape::Shape;
use crate::tolerance::Tolerance;
use num_traits::Float;

/// How two rings with enumerated crossings contain one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Containment {
    /// Neither ring encloses the other (disjoint or overlapping).
    Neither,
    /// The first ring lies inside the second.
    FirstInSecond,
    /// The second ring lies inside the first.
    SecondInFirst,
    /// The rings describe the same boundary.
    Coincident,
}

/// Decides the containment relation of two crossing-annotated rings.
///
/// With no crossings at all a single representative vertex settles the
/// question. Otherwise every non-crossing vertex has to be strictly
/// interior: when two polygons touch along long collinear stretches,
/// every shared vertex ends up in `hits`, and the non-crossing scan is
/// what separates truly-inside from merely-tangent. A surviving verdict
/// is then confirmed against the inner ring's convex hull; a concave
/// vertex that is also a crossing means the boundary only leans on the
/// other ring, and the verdict is dropped.
pub(crate) fn insider<F: Float>(
    hits: &[Point2<F>],
    a: &Shape<F>,
    b: &Shape<F>,
    tol: Tolerance<F>,
) -> Containment {
    let eps = tol.eps;

    if a.ps.len() == hits.len() && b.ps.len() == hits.len() {
        return Containment::Coincident;
    }

    if hits.is_empty() {
        if b.contains(a.ps[0], eps) {
            return Containment::FirstInSecond;
        }
        if a.contains(b.ps[0], eps) {
            return Containment::SecondInFirst;
        }
        return Containment::Neither;
    }

    let a_in_b = contained_in(a, b, hits, eps);
    let b_in_a = contained_in(b, a, hits, eps);
    match (a_in_b, b_in_a) {
        (true, true) => Containment::Coincident,
        (true, false) => Containment::FirstInSecond,
        (false, true) => Containment::SecondInFirst,
        (false, false) => Containment::Neither,
    }
}

/// Tests whether `inner` lies inside `outer`, given the crossing set.
fn contained_in<F: Float>(
    inner: &Shape<F>,
    outer: &Shape<F>,
    hits: &[Point2<F>],
    eps: F,
) -> bool {
    let mut non_crossing = 0;
    for &v in &inner.ps {
        if hits.contains(&v) {
            continue;
        }
        non_crossing += 1;
        if !outer.interior_contains(v, eps) {
            return false;
        }
    }
    if non_crossing == 0 {
        return false;
    }

    // Confirm: no concave (non-hull) vertex of the inner ring may be a
    // crossing.
    let hull_idx = convex_hull_indices(&inner.ps);
    for (k, v) in inner.ps.iter().enumerate() {
        if !hull_idx.contains(&k) && hits.contains(v) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolean::crossings::crossings;

    fn shape(pts: &[(f64, f64)]) -> Shape<f64> {
        let pts: Vec<Point2<f64>> = pts.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        Shape::rationalize(&pts, String::new(), 1e-6).unwrap()
    }

    fn tol() -> Tolerance<f64> {
        Tolerance::default()
    }

    fn classify(a: &Shape<f64>, b: &Shape<f64>) -> Containment {
        let cx = crossings(a, b, tol());
        insider(&cx.hits, &cx.n1, &cx.n2, tol())
    }

    #[test]
    fn test_fully_contained() {
        let outer = shape(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]);
        let inner = shape(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        assert_eq!(classify(&inner, &outer), Containment::FirstInSecond);
        assert_eq!(classify(&outer, &inner), Containment::SecondInFirst);
    }

    #[test]
    fn test_disjoint() {
        let a = shape(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let b = shape(&[(5.0, 5.0), (6.0, 5.0), (6.0, 6.0), (5.0, 6.0)]);
        assert_eq!(classify(&a, &b), Containment::Neither);
    }

    #[test]
    fn test_overlap_is_neither() {
        let a = shape(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = shape(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        assert_eq!(classify(&a, &b), Containment::Neither);
    }

    #[test]
    fn test_coincident() {
        let a = shape(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = shape(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert_eq!(classify(&a, &b), Containment::Coincident);
    }

    #[test]
    fn test_contained_with_shared_edge() {
        // Inner square leaning on the outer boundary from inside; the
        // shared stretch turns into crossings, and the remaining
        // vertices decide containment.
        let outer = shape(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let inner = shape(&[(0.0, 1.0), (2.0, 1.0), (2.0, 3.0), (0.0, 3.0)]);
        assert_eq!(classify(&inner, &outer), Containment::FirstInSecond);
    }

    #[test]
    fn test_tangent_outside_is_neither() {
        // Two squares sharing a full edge, side by side: tangent, not
        // contained.
        let a = shape(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = shape(&[(2.0, 0.0), (4.0, 0.0), (4.0, 2.0), (2.0, 2.0)]);
        assert_eq!(classify(&a, &b), Containment::Neither);
    }
}

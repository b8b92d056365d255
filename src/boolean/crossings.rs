//! Crossing enumeration between two polygon rings.
//!
//! Walks every edge pair of two rings, records each intersection point,
//! and inserts those points into both rings as real vertices. The
//! invariant downstream code leans on: after enumeration, every recorded
//! crossing appears as an exactly-equal vertex in both rings, so the
//! outline walker can match vertices across rings with `==`.

use crate::intersect::intersect;
use crate::primitives::Point2;
use crate::shape::Shape;
use crate::tolerance::{match_point, Tolerance};
use num_traits::Float;

/// The result of enumerating crossings between two rings.
pub(crate) struct Crossings<F> {
    /// Every crossing point, canonical after snapping. Membership is an
    /// exact-equality test.
    pub hits: Vec<Point2<F>>,
    /// A copy of the first ring with crossings inserted as vertices.
    pub n1: Shape<F>,
    /// A copy of the second ring, likewise annotated.
    pub n2: Shape<F>,
}

/// Enumerates the crossings of `p1` and `p2`.
///
/// Both inputs are copied, dissolved to remove degenerate vertices, and
/// re-rationalised so their starting vertices stay canonical. Close but
/// not equal coordinates are a source of problems, so wherever a vertex
/// of one ring matches a vertex or crossing of the other within
/// tolerance, the matching value is rewritten to the canonical point.
///
/// # Panics
///
/// Panics when dissolving empties a ring: the caller fed a polygon that
/// was already degenerate, which upstream construction is supposed to
/// prevent.
pub(crate) fn crossings<F: Float>(
    p1: &Shape<F>,
    p2: &Shape<F>,
    tol: Tolerance<F>,
) -> Crossings<F> {
    let eps = tol.eps;
    let mut n1 = p1.clone();
    let mut n2 = p2.clone();
    n1.dissolve(eps);
    n2.dissolve(eps);
    assert!(
        n1.ps.len() >= 3 && n2.ps.len() >= 3,
        "dissolve emptied a ring during crossing enumeration"
    );
    let mut n1 = Shape::rationalize(&n1.ps, n1.tag.clone(), eps)
        .expect("dissolved ring failed to rationalize");
    let mut n2 = Shape::rationalize(&n2.ps, n2.tag.clone(), eps)
        .expect("dissolved ring failed to rationalize");

    let mut hits: Vec<Point2<F>> = Vec::new();

    let mut i = 0;
    while i < n1.ps.len() {
        let a = n1.ps[i];
        let b_idx = (i + 1) % n1.ps.len();
        if n1.ps.len() > 3 && match_point(a, n1.ps[b_idx], eps) {
            // Trim out points that are too close together, preserving
            // the 0th point.
            if i == 0 {
                n1.ps.remove(1);
            } else {
                n1.ps.remove(i);
            }
            continue;
        }
        let mut b = n1.ps[b_idx];

        let mut j = 0;
        while j < n2.ps.len() {
            let c_idx = j;
            let d_idx = (j + 1) % n2.ps.len();
            let mut c = n2.ps[c_idx];
            let mut d = n2.ps[d_idx];

            // Treat a as the anchor point and move near-coincident
            // vertices of the other ring onto it.
            if match_point(a, c, eps) && a != c {
                n2.ps[c_idx] = a;
                c = a;
            }
            if match_point(a, d, eps) && a != d {
                n2.ps[d_idx] = a;
                d = a;
            }
            if n2.ps.len() > 3 && match_point(c, d, eps) {
                if j == 0 {
                    n2.ps.remove(1);
                } else {
                    n2.ps.remove(j);
                }
                continue;
            }

            let x = intersect(a, b, c, d, tol);
            let e = match x.at {
                Some(at) => {
                    let mut e = at;
                    if match_point(e, a, eps) {
                        e = a;
                    } else if match_point(e, b, eps) {
                        e = b;
                    }
                    e
                }
                None => {
                    j += 1;
                    continue;
                }
            };

            let mut rescan = false;
            if match_point(e, c, eps) {
                if e != c {
                    n2.ps[c_idx] = e;
                }
            } else if match_point(e, d, eps) {
                if e != d {
                    n2.ps[d_idx] = e;
                }
            } else {
                // Strictly interior to CD: insert, and re-examine the
                // shortened edge since the next intersection may sit
                // before this hit.
                n2.ps.insert(c_idx + 1, e);
                rescan = true;
            }
            if !hits.contains(&e) {
                hits.push(e);
            }
            if e != a && e != b {
                // Strictly interior to AB as well.
                n1.ps.insert(i + 1, e);
                b = e;
            }
            if !rescan {
                j += 1;
            }
        }
        i += 1;
    }

    debug_assert!(hits
        .iter()
        .all(|h| n1.ps.contains(h) && n2.ps.contains(h)));

    n1.recompute_bb();
    n2.recompute_bb();
    Crossings { hits, n1, n2 }
}

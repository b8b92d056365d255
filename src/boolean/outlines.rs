//! The outline walker.
//!
//! Given two crossing-annotated rings, traces the outer boundary of
//! their union and stitches the leftover interior arcs into closed
//! holes. The walk starts on the first ring's canonical vertex, which
//! the driver's sort order guarantees to lie on the combined outer hull,
//! and at every crossing takes the more clockwise of the two available
//! continuations.
//!
//! The same walk doubles as the hole trimmer's clipping step: started on
//! a clockwise ring, the most-clockwise rule traces the part of the hole
//! that survives the clip.

use crate::primitives::Point2;
use crate::shape::Shape;
use crate::tolerance::{more_clockwise, Tolerance};
use num_traits::Float;

/// Walks the union boundary of two annotated rings.
///
/// Returns the merged outline first, followed by any interior holes the
/// overlap produced. Counter-clockwise leftovers are spurious (they
/// describe swallowed material, not negative space) and are discarded,
/// as are rings that collapse during rationalisation.
///
/// Returns `None` when the walk fails to close, which indicates input
/// the engine cannot handle (the caller abandons the merge).
pub(crate) fn outlines<F: Float>(
    p1: &Shape<F>,
    p2: &Shape<F>,
    hits: &[Point2<F>],
    tol: Tolerance<F>,
) -> Option<Vec<Shape<F>>> {
    let eps = tol.eps;
    let r1 = &p1.ps;
    let r2 = &p2.ps;
    let len1 = r1.len();
    let len2 = r2.len();
    let mut used1 = vec![false; len1];
    let mut used2 = vec![false; len2];
    let is_hit = |p: &Point2<F>| hits.iter().any(|h| h == p);

    // Trace the outer boundary.
    let start = r1[0];
    let mut out: Vec<Point2<F>> = Vec::with_capacity(len1 + len2);
    let mut on_first = true;
    let mut i = 0usize;
    let cap = 2 * (len1 + len2) + 4;
    let mut steps = 0;
    loop {
        let pt = if on_first { r1[i] } else { r2[i] };
        out.push(pt);
        if on_first {
            used1[i] = true;
        } else {
            used2[i] = true;
        }

        let len_cur = if on_first { len1 } else { len2 };
        let mut next_first = on_first;
        let mut next_i = (i + 1) % len_cur;

        if is_hit(&pt) {
            // Find the matching vertex on the other ring and compare
            // continuations; swap when the other ring turns more
            // clockwise (outward on the outer hull).
            let (other, other_len) = if on_first { (r2, len2) } else { (r1, len1) };
            if let Some(j) = other.iter().position(|q| *q == pt) {
                if on_first {
                    used2[j] = true;
                } else {
                    used1[j] = true;
                }
                let keep_next = if on_first {
                    r1[(i + 1) % len1]
                } else {
                    r2[(i + 1) % len2]
                };
                let swap_next = other[(j + 1) % other_len];
                if more_clockwise(pt, swap_next, keep_next) {
                    next_first = !on_first;
                    next_i = (j + 1) % other_len;
                }
            }
        }

        on_first = next_first;
        i = next_i;
        let next_pt = if on_first { r1[i] } else { r2[i] };
        if next_pt == start {
            break;
        }
        steps += 1;
        if steps > cap {
            return None;
        }
    }

    let mut result: Vec<Shape<F>> = Vec::new();
    let outline_tag = format!("({}+{})", p1.tag, p2.tag);
    result.push(finish(&out, outline_tag, eps)?);

    // Leftover interior arcs, delimited by crossings, pair up across the
    // rings into closed holes.
    let hole_tag = |k: usize| format!("{}^{}.{}", p1.tag, p2.tag, k);
    let mut hole_n = 0;

    for arc in unused_arcs(r1, &mut used1, hits) {
        let pt0 = arc[0];
        let pt1 = *arc.last().unwrap();
        let Some(back) = return_path(r2, &mut used2, hits, pt1, pt0) else {
            continue; // spurious leftover
        };
        let mut ring = arc;
        ring.extend(back);
        hole_n += 1;
        if let Some(h) = finish(&ring, hole_tag(hole_n), eps) {
            if h.hole {
                result.push(h);
            } else {
                hole_n -= 1;
            }
        } else {
            hole_n -= 1;
        }
    }

    // Arcs of the second ring not consumed above close onto themselves.
    for ring in unused_arcs(r2, &mut used2, hits) {
        hole_n += 1;
        if let Some(h) = finish(&ring, hole_tag(hole_n), eps) {
            if h.hole {
                result.push(h);
            } else {
                hole_n -= 1;
            }
        } else {
            hole_n -= 1;
        }
    }

    Some(result)
}

/// Dissolves and rationalises a raw walk result.
fn finish<F: Float>(ps: &[Point2<F>], tag: String, eps: F) -> Option<Shape<F>> {
    let mut s = Shape::rationalize(ps, tag, eps).ok()?;
    if s.dissolve(eps) {
        // Dissolve may have taken the canonical starting vertex with it.
        let tag = s.tag.clone();
        s = Shape::rationalize(&s.ps, tag, eps).ok()?;
    }
    Some(s)
}

/// Extracts the unused arcs of a ring: stretches of not-yet-used
/// vertices, extended to their flanking vertices and split at crossing
/// points, so every returned arc runs from one crossing to the next.
/// The arc interiors are marked used.
fn unused_arcs<F: Float>(
    ring: &[Point2<F>],
    used: &mut [bool],
    hits: &[Point2<F>],
) -> Vec<Vec<Point2<F>>> {
    let n = ring.len();
    let is_hit = |p: &Point2<F>| hits.iter().any(|h| h == p);
    let mut arcs = Vec::new();

    let Some(anchor) = (0..n).find(|&k| used[k]) else {
        return arcs;
    };

    // Maximal cyclic runs of unused vertices, scanned from the anchor.
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut k = 0;
    while k < n {
        let idx = (anchor + 1 + k) % n;
        if used[idx] {
            k += 1;
            continue;
        }
        let s = k;
        let mut l = 0;
        while k < n && !used[(anchor + 1 + k) % n] {
            l += 1;
            k += 1;
        }
        runs.push(((anchor + 1 + s) % n, l));
    }

    for (s, l) in runs {
        // The run plus its flanking used vertices.
        let mut seq: Vec<(usize, Point2<F>)> = Vec::with_capacity(l + 2);
        let before = (s + n - 1) % n;
        seq.push((before, ring[before]));
        for k in 0..l {
            let idx = (s + k) % n;
            seq.push((idx, ring[idx]));
        }
        let after = (s + l) % n;
        seq.push((after, ring[after]));

        // Split at crossings: each arc is one crossing-to-crossing
        // stretch with a non-crossing interior.
        let hit_pos: Vec<usize> = (0..seq.len()).filter(|&p| is_hit(&seq[p].1)).collect();
        for w in hit_pos.windows(2) {
            let (p, q) = (w[0], w[1]);
            if q - p < 2 {
                continue; // bare edge between crossings, nothing interior
            }
            for &(idx, _) in &seq[p + 1..q] {
                used[idx] = true;
            }
            arcs.push(seq[p..=q].iter().map(|&(_, v)| v).collect());
        }
    }
    arcs
}

/// Finds the return arc closing a hole: from `pt1`, walk the other
/// ring's unused vertices until `pt0`, trying both directions. Returns
/// the interior vertices of the arc (possibly none, when the crossings
/// are adjacent), marking them used.
fn return_path<F: Float>(
    ring: &[Point2<F>],
    used: &mut [bool],
    hits: &[Point2<F>],
    pt1: Point2<F>,
    pt0: Point2<F>,
) -> Option<Vec<Point2<F>>> {
    let n = ring.len();
    let is_hit = |p: &Point2<F>| hits.iter().any(|h| h == p);
    let q = ring.iter().position(|p| *p == pt1)?;

    'dir: for dir in [1isize, -1] {
        let mut acc: Vec<usize> = Vec::new();
        let mut k = q as isize;
        for _ in 0..n {
            k = (k + dir).rem_euclid(n as isize);
            let idx = k as usize;
            if ring[idx] == pt0 {
                for &a in &acc {
                    used[a] = true;
                }
                return Some(acc.into_iter().map(|a| ring[a]).collect());
            }
            if used[idx] || is_hit(&ring[idx]) {
                continue 'dir;
            }
            acc.push(idx);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolean::crossings::crossings;

    fn shape(pts: &[(f64, f64)]) -> Shape<f64> {
        let pts: Vec<Point2<f64>> = pts.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        Shape::rationalize(&pts, "t".to_string(), 1e-6).unwrap()
    }

    fn tol() -> Tolerance<f64> {
        Tolerance::default()
    }

    fn merge(a: &Shape<f64>, b: &Shape<f64>) -> Vec<Shape<f64>> {
        let cx = crossings(a, b, tol());
        assert!(cx.hits.len() >= 2);
        outlines(&cx.n1, &cx.n2, &cx.hits, tol()).unwrap()
    }

    fn ring(s: &Shape<f64>) -> Vec<(f64, f64)> {
        s.ps.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_two_overlapping_squares() {
        let a = shape(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let b = shape(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let out = merge(&a, &b);
        assert_eq!(out.len(), 1); // lens leftover is CCW and discarded
        assert_eq!(
            ring(&out[0]),
            vec![
                (0.0, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (3.0, 1.0),
                (3.0, 3.0),
                (1.0, 3.0),
                (1.0, 2.0),
                (0.0, 2.0),
            ]
        );
        assert!(!out[0].hole);
        assert_eq!(out[0].tag, "(t+t)");
    }

    #[test]
    fn test_edge_sharing_squares() {
        let a = shape(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let b = shape(&[(2.0, 0.0), (3.0, 0.0), (3.0, 2.0), (2.0, 2.0)]);
        let out = merge(&a, &b);
        assert_eq!(out.len(), 1);
        assert_eq!(
            ring(&out[0]),
            vec![
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 0.0),
                (3.0, 0.0),
                (3.0, 2.0),
                (1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_u_and_cap_produce_hole() {
        // A U-shape capped by a bar across its slot leaves a closed
        // hole underneath the bar.
        let u = shape(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let cap = shape(&[(0.5, 2.0), (2.5, 2.0), (2.5, 2.5), (0.5, 2.5)]);
        let out = merge(&u, &cap);
        assert_eq!(out.len(), 2);

        // The outline dips into the still-open slot above the cap.
        assert_eq!(
            ring(&out[0]),
            vec![
                (0.0, 0.0),
                (3.0, 0.0),
                (3.0, 3.0),
                (2.0, 3.0),
                (2.0, 2.5),
                (1.0, 2.5),
                (1.0, 3.0),
                (0.0, 3.0),
            ]
        );
        assert!(!out[0].hole);

        // The slot below the cap is now enclosed.
        assert!(out[1].hole);
        assert_eq!(
            ring(&out[1]),
            vec![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]
        );
    }

    #[test]
    fn test_hole_trim_walk() {
        // Started on a clockwise ring, the walk yields the difference:
        // the hole minus the clipping shape, still clockwise.
        let hole = {
            let pts = [(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0)];
            let pts: Vec<Point2<f64>> =
                pts.iter().map(|&(x, y)| Point2::new(x, y)).collect();
            Shape::rationalize(&pts, "h".to_string(), 1e-6).unwrap()
        };
        assert!(hole.hole);
        let clip = shape(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
        let cx = crossings(&hole, &clip, tol());
        let out = outlines(&cx.n1, &cx.n2, &cx.hits, tol()).unwrap();
        let kept: Vec<&Shape<f64>> = out.iter().filter(|s| s.hole).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(
            ring(kept[0]),
            vec![
                (0.0, 0.0),
                (0.0, 2.0),
                (1.0, 2.0),
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 0.0),
            ]
        );
    }
}

//! The union engine.
//!
//! [`Shapes::union`] merges every counter-clockwise shape in the
//! collection into canonical non-overlapping outlines, clips the
//! clockwise holes against the shapes that cover them, and re-attaches
//! the surviving holes. The driver works left to right over the sorted
//! collection; the resume index each pairwise step returns (`banked`)
//! lets it revisit earlier positions after a merge grows a shape into
//! territory that previously cleared it.

pub(crate) mod crossings;
pub(crate) mod insider;
pub(crate) mod outlines;

use crate::shape::{Shape, Shapes};
use crossings::crossings;
use insider::{insider, Containment};
use num_traits::Float;
use outlines::outlines;
use std::cmp::Ordering;

impl<F: Float> Shapes<F> {
    /// Combines all of the shape outlines into union outlines.
    ///
    /// Shapes are merged pairwise until no two overlap; holes are
    /// trimmed against the shapes that cover them, annihilated where a
    /// shape swallows them whole, and re-attached at the end of the
    /// collection. Containment removes the enclosed polygon entirely.
    ///
    /// The result is the new canonical state of the collection. Note
    /// that dissolving straight stretches during a union can remove
    /// vertices a later merge would need: calling `union` again on an
    /// already-unioned collection is not guaranteed to be correct.
    ///
    /// # Example
    ///
    /// ```
    /// use polygonal::shape::Shapes;
    /// use polygonal::primitives::Point2;
    ///
    /// let mut ss: Shapes<f64> = Shapes::new()
    ///     .builder(&[
    ///         Point2::new(0.0, 0.0),
    ///         Point2::new(2.0, 0.0),
    ///         Point2::new(2.0, 2.0),
    ///         Point2::new(0.0, 2.0),
    ///     ])
    ///     .builder(&[
    ///         Point2::new(1.0, 1.0),
    ///         Point2::new(3.0, 1.0),
    ///         Point2::new(3.0, 3.0),
    ///         Point2::new(1.0, 3.0),
    ///     ]);
    /// ss.union();
    /// assert_eq!(ss.len(), 1);
    /// ```
    pub fn union(&mut self) {
        if self.p.len() < 2 {
            return;
        }
        self.reorder();
        // Holes are clipped against the original, pre-merge shapes.
        let reference = self.clone();
        let mut holed: Vec<Shape<F>> = Vec::new();

        let mut i = 0;
        while i < self.p.len() {
            let mut j = i + 1;
            while j < self.p.len() {
                j = if self.p[j].hole {
                    self.trim_hole(j, &reference, &mut holed)
                } else {
                    self.combine(i, j)
                };
                if j < self.p.len() && self.p[i].bb.max.x < self.p[j].bb.min.x {
                    break; // next polygon too far right to overlap
                }
            }
            i += 1;
        }

        self.p.extend(holed);
    }

    /// Computes the union of the shapes at `n` and `m`.
    ///
    /// Either a no-op, or one merged outline plus zero or more holes
    /// replacing the pair. Returns the index at which the driver should
    /// resume: after a merge that is `n + 1`, so shapes that previously
    /// cleared the pair get re-tested against the grown outline.
    pub(crate) fn combine(&mut self, n: usize, m: usize) -> usize {
        let eps = self.tol.eps;

        // Degenerate candidates are dropped rather than merged.
        self.p[m].dissolve(eps);
        if self.p[m].ps.len() < 3 {
            self.p.remove(m);
            return m;
        }
        // Holes are not combined here; the driver routes them through
        // trim_hole.
        if self.p[m].hole || self.p[n].hole {
            return m + 1;
        }
        if !self.p[n].bb.expand(eps).overlaps(self.p[m].bb) {
            return m + 1;
        }

        let cx = crossings(&self.p[n], &self.p[m], self.tol);
        match insider(&cx.hits, &cx.n1, &cx.n2, self.tol) {
            Containment::Coincident | Containment::SecondInFirst => {
                self.p.remove(m);
                return m;
            }
            Containment::FirstInSecond => {
                self.p.remove(n);
                return n + 1;
            }
            Containment::Neither => {}
        }

        if cx.hits.len() < 2 {
            // Disjoint, or a single-point kiss: keep the annotated
            // rings so the shared point stays canonical in both.
            self.p[n] = cx.n1;
            self.p[m] = cx.n2;
            return m + 1;
        }

        match outlines(&cx.n1, &cx.n2, &cx.hits, self.tol) {
            Some(merged) => {
                let between: Vec<Shape<F>> = self.p[n + 1..m].to_vec();
                let tail: Vec<Shape<F>> = self.p[m + 1..].to_vec();
                self.p.truncate(n);
                self.p.extend(merged);
                self.p.extend(between);
                self.p.extend(tail);
                n + 1
            }
            None => {
                // The walk failed to close; leave the pair alone.
                self.p[n] = cx.n1;
                self.p[m] = cx.n2;
                m + 1
            }
        }
    }

    /// Clips the hole at index `i` against every non-hole that follows
    /// it in the original sorted order, then moves the surviving
    /// fragments onto the `holed` side list.
    ///
    /// Shapes sorted after a hole are exactly the ones that are not its
    /// enclosing parent, so a parent never annihilates its own hole. A
    /// shape that lies entirely inside the hole is an island: it is
    /// pulled out of the active set, unioned as an independent
    /// sub-problem, and re-attached alongside the hole fragments.
    pub(crate) fn trim_hole(
        &mut self,
        i: usize,
        reference: &Shapes<F>,
        holed: &mut Vec<Shape<F>>,
    ) -> usize {
        let eps = self.tol.eps;
        let hole = self.p.remove(i);
        let mut fragments: Vec<Shape<F>> = vec![hole.clone()];
        let mut islands: Vec<Shape<F>> = Vec::new();

        for s in reference.p.iter() {
            if s.hole || s.order_cmp(&hole) != Ordering::Greater {
                continue;
            }
            let mut next: Vec<Shape<F>> = Vec::new();
            for f in fragments.drain(..).collect::<Vec<_>>() {
                if !f.bb.expand(eps).overlaps(s.bb) {
                    next.push(f);
                    continue;
                }
                let cx = crossings(&f, s, self.tol);
                match insider(&cx.hits, &cx.n1, &cx.n2, self.tol) {
                    Containment::FirstInSecond | Containment::Coincident => {
                        // The shape covers this fragment entirely: the
                        // hole is annihilated.
                        continue;
                    }
                    Containment::SecondInFirst => {
                        if !islands.iter().any(|isl| isl.tag == s.tag) {
                            islands.push(s.clone());
                        }
                        next.push(f);
                        continue;
                    }
                    Containment::Neither => {}
                }
                if cx.hits.len() < 2 {
                    next.push(f);
                    continue;
                }

                // The walk must start outside the clipping shape.
                let mut f1 = cx.n1;
                let start = f1
                    .ps
                    .iter()
                    .position(|&v| !cx.hits.contains(&v) && !cx.n2.contains(v, eps));
                match start {
                    Some(k) => f1.rotate_to(k),
                    None => continue, // nothing of the hole survives
                }

                match outlines(&f1, &cx.n2, &cx.hits, self.tol) {
                    Some(pieces) => {
                        // Only hole-oriented fragments survive the clip.
                        next.extend(pieces.into_iter().filter(|p| p.hole));
                    }
                    None => next.push(f),
                }
            }
            fragments = next;
        }

        holed.extend(fragments);

        if !islands.is_empty() {
            let mut sub = Shapes::with_tolerance(self.tol);
            for isl in &islands {
                match self.p.iter().position(|s| s.tag == isl.tag) {
                    Some(pos) => sub.p.push(self.p.remove(pos)),
                    None => sub.p.push(isl.clone()),
                }
            }
            sub.union();
            holed.append(&mut sub.p);
        }

        i
    }
}

#[cfg(test)]
mod tests {
    use crate::primitives::Point2;
    use crate::shape::Shapes;

    fn pts(v: &[(f64, f64)]) -> Vec<Point2<f64>> {
        v.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn ring(ss: &Shapes<f64>, i: usize) -> Vec<(f64, f64)> {
        ss.p[i].ps.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_union_two_overlapping_squares() {
        // The second square starts out clockwise and is inverted into a
        // shape before the union.
        let mut ss: Shapes<f64> = Shapes::new();
        ss.append(&pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]))
            .unwrap();
        assert!(!ss.p[0].hole);
        ss.append(&pts(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]))
            .unwrap();
        assert!(ss.p[1].hole);
        ss.invert(1).unwrap();
        assert!(!ss.p[1].hole);

        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
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
    }

    #[test]
    fn test_union_disjoint_pairs() {
        // Two separated clusters of two overlapping squares each merge
        // into exactly two shapes.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]))
            .builder(&pts(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]))
            .builder(&pts(&[(0.0, 4.0), (2.0, 4.0), (2.0, 6.0), (0.0, 6.0)]))
            .builder(&pts(&[(1.0, 5.0), (3.0, 5.0), (3.0, 7.0), (1.0, 7.0)]));
        ss.union();
        assert_eq!(ss.len(), 2);
        assert_eq!(
            ring(&ss, 0),
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
        assert_eq!(
            ring(&ss, 1),
            vec![
                (0.0, 4.0),
                (2.0, 4.0),
                (2.0, 5.0),
                (3.0, 5.0),
                (3.0, 7.0),
                (1.0, 7.0),
                (1.0, 6.0),
                (0.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_union_swallows_contained_square() {
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]))
            .builder(&pts(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (0.0, 3.0)]
        );
    }

    #[test]
    fn test_union_three_rectangles_form_u() {
        // Bottom bar, top bar, and a right spine joining them.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (5.0, 0.0), (5.0, 1.0), (0.0, 1.0)]))
            .builder(&pts(&[(1.0, 2.0), (5.0, 2.0), (5.0, 3.0), (1.0, 3.0)]))
            .builder(&pts(&[(4.0, 0.0), (5.0, 0.0), (5.0, 3.0), (4.0, 3.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![
                (0.0, 0.0),
                (5.0, 0.0),
                (5.0, 3.0),
                (1.0, 3.0),
                (1.0, 2.0),
                (4.0, 2.0),
                (4.0, 1.0),
                (0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_union_collinear_edge_coincidence() {
        // Squares sharing a stretch of a vertical edge.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]))
            .builder(&pts(&[(2.0, 0.0), (3.0, 0.0), (3.0, 2.0), (2.0, 2.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
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
    fn test_union_coincident_heavy_overlap() {
        // A square whose right half is buried in its neighbour,
        // touching along collinear stretches.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]))
            .builder(&pts(&[(0.0, 0.0), (1.5, 0.0), (1.5, 1.0), (0.0, 1.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![
                (0.0, 0.0),
                (1.5, 0.0),
                (1.5, 1.0),
                (2.0, 1.0),
                (2.0, 2.0),
                (1.0, 2.0),
                (1.0, 1.0),
                (0.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_union_taller_neighbour() {
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]))
            .builder(&pts(&[(2.0, 0.0), (3.0, 0.0), (3.0, 3.0), (2.0, 3.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 0.0),
                (3.0, 0.0),
                (3.0, 3.0),
                (2.0, 3.0),
                (2.0, 2.0),
                (1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_union_t_junction() {
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(1.0, 0.0), (2.0, 0.0), (2.0, 3.0), (1.0, 3.0)]))
            .builder(&pts(&[(2.0, 1.0), (3.0, 1.0), (3.0, 2.0), (2.0, 2.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![
                (1.0, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (3.0, 1.0),
                (3.0, 2.0),
                (2.0, 2.0),
                (2.0, 3.0),
                (1.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_union_u_and_cap_leaves_hole() {
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[
                (0.0, 0.0),
                (3.0, 0.0),
                (3.0, 3.0),
                (2.0, 3.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 3.0),
                (0.0, 3.0),
            ]))
            .builder(&pts(&[(0.5, 2.0), (2.5, 2.0), (2.5, 2.5), (0.5, 2.5)]));
        ss.union();
        assert_eq!(ss.len(), 2);
        assert!(!ss.p[0].hole);
        assert!(ss.p[1].hole);
        assert_eq!(
            ring(&ss, 1),
            vec![(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)]
        );
    }

    #[test]
    fn test_union_bar_corners_on_pill_slants() {
        // A flat bar whose left corners land exactly on the slanted
        // nose of a pill. The contact points are canonical snapping
        // points and must appear, exactly, in the output ring.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[
                (1.0, 0.0),
                (3.0, 0.0),
                (4.0, 1.0),
                (3.0, 2.0),
                (1.0, 2.0),
                (0.0, 1.0),
            ]))
            .builder(&pts(&[(3.5, 0.5), (6.0, 0.5), (6.0, 1.5), (3.5, 1.5)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![
                (0.0, 1.0),
                (1.0, 0.0),
                (3.0, 0.0),
                (3.5, 0.5),
                (6.0, 0.5),
                (6.0, 1.5),
                (3.5, 1.5),
                (3.0, 2.0),
                (1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_union_collinear_contacts_are_dissolved() {
        // When the bar's edges run along the pill's flat top and
        // bottom, the contact points are collinear in the merged ring
        // and dissolve compresses them away. This loss is the
        // documented reason a second union over the result is not
        // guaranteed to work.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[
                (1.0, 0.0),
                (3.0, 0.0),
                (4.0, 1.0),
                (3.0, 2.0),
                (1.0, 2.0),
                (0.0, 1.0),
            ]))
            .builder(&pts(&[(2.0, 0.0), (6.0, 0.0), (6.0, 2.0), (2.0, 2.0)]));
        ss.union();
        assert_eq!(ss.len(), 1);
        assert_eq!(
            ring(&ss, 0),
            vec![(0.0, 1.0), (1.0, 0.0), (6.0, 0.0), (6.0, 2.0), (1.0, 2.0)]
        );
    }

    #[test]
    fn test_union_hole_annihilated_by_covering_shapes() {
        // Two shapes that follow the hole in sort order jointly cover
        // it: the first clips it down to a fragment, the second
        // swallows the fragment whole. No negative space survives.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]))
            .builder(&pts(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]))
            .builder(&pts(&[(1.0, 1.0), (1.7, 1.0), (1.7, 3.5), (1.0, 3.5)]))
            .builder(&pts(&[(1.5, 0.5), (3.5, 0.5), (3.5, 3.5), (1.5, 3.5)]));
        assert!(ss.p[1].hole);
        ss.union();
        assert_eq!(ss.len(), 1);
        assert!(!ss.p[0].hole);
    }

    #[test]
    fn test_union_keeps_uncovered_hole() {
        // A hole inside its parent shape, covered by nothing else,
        // survives the union untouched.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]))
            .builder(&pts(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]));
        assert!(ss.p[1].hole);
        ss.union();
        assert_eq!(ss.len(), 2);
        assert!(!ss.p[0].hole);
        assert!(ss.p[1].hole);
        assert_eq!(
            ring(&ss, 1),
            vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]
        );
    }

    #[test]
    fn test_union_hole_partially_covered() {
        // A second shape covers the right half of the hole; only the
        // uncovered left part survives as negative space.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]))
            .builder(&pts(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]))
            .builder(&pts(&[(2.0, 1.0), (3.0, 1.0), (3.0, 3.0), (2.0, 3.0)]));
        ss.union();
        let holes: Vec<_> = ss.p.iter().filter(|s| s.hole).collect();
        assert_eq!(holes.len(), 1);
        let got: Vec<(f64, f64)> = holes[0].ps.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(got, vec![(1.0, 1.0), (1.0, 3.0), (2.0, 3.0), (2.0, 1.0)]);
    }

    #[test]
    fn test_union_island_inside_hole() {
        // A small shape floating inside a hole is pulled aside, unioned
        // on its own, and re-attached.
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (6.0, 0.0), (6.0, 6.0), (0.0, 6.0)]))
            .builder(&pts(&[(1.0, 1.0), (1.0, 5.0), (5.0, 5.0), (5.0, 1.0)]))
            .builder(&pts(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)]));
        assert!(ss.p[1].hole);
        ss.union();
        assert_eq!(ss.len(), 3);
        let holes = ss.p.iter().filter(|s| s.hole).count();
        assert_eq!(holes, 1);
        // The island shape survives as its own positive region.
        assert!(ss
            .p
            .iter()
            .any(|s| !s.hole && s.bb.min == Point2::new(2.0, 2.0)));
    }

    #[test]
    fn test_union_idempotent_when_disjoint() {
        let mut ss: Shapes<f64> = Shapes::new()
            .builder(&pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]))
            .builder(&pts(&[(5.0, 0.0), (6.0, 0.0), (6.0, 1.0), (5.0, 1.0)]))
            .builder(&pts(&[(10.0, 0.0), (11.0, 0.0), (11.0, 1.0), (10.0, 1.0)]));
        ss.union();
        assert_eq!(ss.len(), 3);
    }

    #[test]
    fn test_union_single_shape_is_noop() {
        let mut ss: Shapes<f64> = Shapes::new().builder(&pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]));
        let before = ss.clone();
        ss.union();
        assert_eq!(ss, before);
    }
}

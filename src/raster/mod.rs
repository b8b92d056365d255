//! Scanline generation and pen-travel optimisation.
//!
//! Slicing turns a shape (minus selected holes) into a set of parallel
//! pen strokes for rasterising or infilling. The strokes can then be
//! reordered to minimise the travel between consecutive lines.

use crate::error::PolygonError;
use crate::primitives::{Point2, Segment2};
use crate::shape::Shapes;
use num_traits::{Float, ToPrimitive};

impl<F: Float> Shapes<F> {
    /// Generates horizontal scan lines rasterising shape `i`, with the
    /// listed holes subtracted.
    ///
    /// Lines are spaced `d` apart, centred within the shape's vertical
    /// extent, each spanning the interior at its level under the
    /// even-odd rule. Fails when `i` or a hole index is out of range,
    /// when shape `i` is itself a hole, or when a scan level keeps
    /// crossing the boundary an odd number of times after nudging.
    ///
    /// # Example
    ///
    /// ```
    /// use polygonal::shape::Shapes;
    /// use polygonal::primitives::Point2;
    ///
    /// let ss: Shapes<f64> = Shapes::new().builder(&[
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(2.0, 0.0),
    ///     Point2::new(2.0, 2.0),
    ///     Point2::new(0.0, 2.0),
    /// ]);
    /// let lines = ss.slice(0, 1.0, &[]).unwrap();
    /// assert_eq!(lines.len(), 2); // levels 0.5 and 1.5
    /// ```
    pub fn slice(&self, i: usize, d: F, holes: &[usize]) -> Result<Vec<Segment2<F>>, PolygonError> {
        let rings = self.gather_rings(i, holes, false)?;
        let (min, max) = vertical_extent(&rings);
        scan(&rings, min, max, d, self.tolerance().eps).map(|lines| {
            lines
                .into_iter()
                .map(|(x0, x1, y)| Segment2::from_coords(x0, y, x1, y))
                .collect()
        })
    }

    /// Generates vertical scan lines rasterising shape `i`, with the
    /// listed holes subtracted.
    ///
    /// The vertical counterpart of [`Shapes::slice`]: lines run bottom
    /// to top, spaced `d` apart across the shape's horizontal extent.
    pub fn vslice(&self, i: usize, d: F, holes: &[usize]) -> Result<Vec<Segment2<F>>, PolygonError> {
        let rings = self.gather_rings(i, holes, true)?;
        let (min, max) = vertical_extent(&rings);
        scan(&rings, min, max, d, self.tolerance().eps).map(|lines| {
            lines
                .into_iter()
                .map(|(y0, y1, x)| Segment2::from_coords(x, y0, x, y1))
                .collect()
        })
    }

    /// Collects the rings taking part in a slice, validating indices.
    /// With `transpose` set, x and y are swapped so the scan core only
    /// ever sweeps horizontally.
    fn gather_rings(
        &self,
        i: usize,
        holes: &[usize],
        transpose: bool,
    ) -> Result<Vec<Vec<Point2<F>>>, PolygonError> {
        let len = self.p.len();
        let shape = self
            .p
            .get(i)
            .ok_or(PolygonError::InvalidIndex { index: i, len })?;
        if shape.hole {
            return Err(PolygonError::SliceOfHole { index: i });
        }
        let mut rings = Vec::with_capacity(1 + holes.len());
        let project = |p: &Point2<F>| {
            if transpose {
                Point2::new(p.y, p.x)
            } else {
                *p
            }
        };
        rings.push(shape.ps.iter().map(project).collect());
        for &h in holes {
            let hole = self
                .p
                .get(h)
                .ok_or(PolygonError::InvalidIndex { index: h, len })?;
            rings.push(hole.ps.iter().map(project).collect());
        }
        Ok(rings)
    }
}

/// The y-range of the first (outer) ring.
fn vertical_extent<F: Float>(rings: &[Vec<Point2<F>>]) -> (F, F) {
    let mut min = F::infinity();
    let mut max = F::neg_infinity();
    for p in &rings[0] {
        min = min.min(p.y);
        max = max.max(p.y);
    }
    (min, max)
}

/// Sweeps horizontal levels over the rings, pairing edge crossings
/// under the even-odd rule. Returns `(x0, x1, level)` triples.
fn scan<F: Float>(
    rings: &[Vec<Point2<F>>],
    min: F,
    max: F,
    d: F,
    eps: F,
) -> Result<Vec<(F, F, F)>, PolygonError> {
    if d <= F::zero() {
        return Ok(Vec::new());
    }
    let half = d / (F::one() + F::one());
    let mut out = Vec::new();
    let mut level = min + half;
    while level < max {
        let xs = crossings_at(rings, level, d)?;
        for pair in xs.chunks(2) {
            if pair.len() == 2 && pair[1] - pair[0] > eps {
                out.push((pair[0], pair[1], level));
            }
        }
        level = level + d;
    }
    Ok(out)
}

/// Sorted boundary crossings at one scan level, nudging the level when
/// the count comes out odd.
fn crossings_at<F: Float>(
    rings: &[Vec<Point2<F>>],
    level: F,
    d: F,
) -> Result<Vec<F>, PolygonError> {
    let nudges: [f64; 6] = [0.0, 0.001, -0.001, 0.003, -0.003, 0.007];
    for nudge in nudges {
        let y = level + d * F::from(nudge).unwrap();
        let mut xs: Vec<F> = Vec::new();
        for ring in rings {
            let n = ring.len();
            let mut j = n - 1;
            for i in 0..n {
                let a = ring[j];
                let b = ring[i];
                if (a.y > y) != (b.y > y) {
                    xs.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
                }
                j = i;
            }
        }
        if xs.len() % 2 == 0 {
            xs.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
            return Ok(xs);
        }
    }
    Err(PolygonError::OddCrossings {
        level: level.to_f64().unwrap_or(f64::NAN),
    })
}

/// Reorders lines, flipping endpoints where useful, so the pen travels
/// as little as possible between the end of one line and the start of
/// the next.
///
/// Greedy nearest-neighbour: keeps the first line fixed and repeatedly
/// pulls in whichever remaining line starts (either way round) closest
/// to the current pen position.
///
/// # Example
///
/// ```
/// use polygonal::raster::optimize_lines;
/// use polygonal::primitives::Segment2;
///
/// let mut lines: Vec<Segment2<f64>> = vec![
///     Segment2::from_coords(0.0, 0.0, 1.0, 0.0),
///     Segment2::from_coords(9.0, 1.0, 1.0, 1.0),
///     Segment2::from_coords(0.0, 2.0, 9.0, 2.0),
/// ];
/// optimize_lines(&mut lines);
/// // The middle line is flipped so it starts near (1, 0).
/// assert_eq!(lines[1].start.x, 1.0);
/// ```
pub fn optimize_lines<F: Float>(lines: &mut [Segment2<F>]) {
    if lines.len() < 2 {
        return;
    }
    let mut cur = lines[0].end;
    for k in 1..lines.len() {
        let mut best = k;
        let mut best_d = F::infinity();
        let mut flip = false;
        for (j, l) in lines.iter().enumerate().skip(k) {
            let ds = cur.distance_squared(l.start);
            if ds < best_d {
                best = j;
                best_d = ds;
                flip = false;
            }
            let de = cur.distance_squared(l.end);
            if de < best_d {
                best = j;
                best_d = de;
                flip = true;
            }
        }
        lines.swap(k, best);
        if flip {
            lines[k] = lines[k].reversed();
        }
        cur = lines[k].end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shapes;
    use approx::assert_relative_eq;

    fn pts(v: &[(f64, f64)]) -> Vec<Point2<f64>> {
        v.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn square_4x4() -> Shapes<f64> {
        Shapes::new().builder(&pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]))
    }

    #[test]
    fn test_slice_square() {
        let ss = square_4x4();
        let lines = ss.slice(0, 1.0, &[]).unwrap();
        assert_eq!(lines.len(), 4);
        for (k, l) in lines.iter().enumerate() {
            assert_relative_eq!(l.start.y, 0.5 + k as f64, epsilon = 1e-9);
            assert_relative_eq!(l.start.x, 0.0, epsilon = 1e-9);
            assert_relative_eq!(l.end.x, 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_slice_with_hole() {
        let mut ss = square_4x4();
        ss.append(&pts(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]))
            .unwrap();
        assert!(ss.p[1].hole);
        let lines = ss.slice(0, 1.0, &[1]).unwrap();
        // Levels 0.5 and 3.5 span the square; 1.5 and 2.5 are split in
        // two by the hole.
        assert_eq!(lines.len(), 6);
        let at_15: Vec<_> = lines.iter().filter(|l| l.start.y == 1.5).collect();
        assert_eq!(at_15.len(), 2);
        assert_relative_eq!(at_15[0].end.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(at_15[1].start.x, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vslice_square() {
        let ss = square_4x4();
        let lines = ss.vslice(0, 2.0, &[]).unwrap();
        assert_eq!(lines.len(), 2);
        for l in &lines {
            assert_relative_eq!(l.start.y, 0.0, epsilon = 1e-9);
            assert_relative_eq!(l.end.y, 4.0, epsilon = 1e-9);
        }
        assert_relative_eq!(lines[0].start.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(lines[1].start.x, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slice_level_through_vertices() {
        // A diamond sliced exactly through its widest points still
        // produces one clean span.
        let ss: Shapes<f64> =
            Shapes::new().builder(&pts(&[(1.0, 0.0), (2.0, 1.0), (1.0, 2.0), (0.0, 1.0)]));
        let lines = ss.slice(0, 2.0, &[]).unwrap();
        assert_eq!(lines.len(), 1);
        assert_relative_eq!(lines[0].start.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(lines[0].end.x, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slice_errors() {
        let mut ss = square_4x4();
        ss.append(&pts(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)]))
            .unwrap();
        assert_eq!(
            ss.slice(5, 1.0, &[]),
            Err(PolygonError::InvalidIndex { index: 5, len: 2 })
        );
        assert_eq!(
            ss.slice(1, 1.0, &[]),
            Err(PolygonError::SliceOfHole { index: 1 })
        );
        assert_eq!(
            ss.slice(0, 1.0, &[9]),
            Err(PolygonError::InvalidIndex { index: 9, len: 2 })
        );
    }

    #[test]
    fn test_optimize_lines_reduces_travel() {
        let mut lines: Vec<Segment2<f64>> = vec![
            Segment2::from_coords(0.0, 0.0, 10.0, 0.0),
            Segment2::from_coords(0.0, 1.0, 10.0, 1.0),
            Segment2::from_coords(0.0, 2.0, 10.0, 2.0),
        ];
        let travel = |ls: &[Segment2<f64>]| {
            ls.windows(2)
                .map(|w| w[0].end.distance(w[1].start))
                .sum::<f64>()
        };
        let before = travel(&lines);
        optimize_lines(&mut lines);
        let after = travel(&lines);
        assert!(after < before);
        // Boustrophedon: alternate lines run right-to-left.
        assert_eq!(lines[1].start.x, 10.0);
        assert_eq!(lines[2].start.x, 0.0);
    }

    #[test]
    fn test_optimize_lines_keeps_all_lines() {
        let mut lines: Vec<Segment2<f64>> = (0..8)
            .map(|k| Segment2::from_coords(0.0, k as f64, 5.0, k as f64))
            .collect();
        optimize_lines(&mut lines);
        assert_eq!(lines.len(), 8);
        for k in 0..8 {
            assert!(lines
                .iter()
                .any(|l| l.start.y == k as f64 && l.end.y == k as f64));
        }
    }
}

//! Polygon inflation.
//!
//! Each vertex is pushed along the outward normals of both edges it
//! joins, half the distance per edge. Inflating a circle by `d` grows
//! its diameter by `d`.

use crate::error::PolygonError;
use crate::shape::Shapes;
use num_traits::Float;

impl<F: Float> Shapes<F> {
    /// Inflates the shape at index `n` by distance `d`.
    ///
    /// Positive distances grow shapes outward; holes, winding the other
    /// way, deflate by the same amount. A zero distance is a no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use polygonal::shape::Shapes;
    /// use polygonal::primitives::Point2;
    ///
    /// let mut ss: Shapes<f64> = Shapes::new().builder(&[
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(2.0, 0.0),
    ///     Point2::new(2.0, 2.0),
    ///     Point2::new(0.0, 2.0),
    /// ]);
    /// ss.inflate(0, 1.0).unwrap();
    /// let bb = ss.p[0].bb();
    /// assert!((bb.min.x - -0.5).abs() < 1e-9);
    /// assert!((bb.max.x - 2.5).abs() < 1e-9);
    /// ```
    pub fn inflate(&mut self, n: usize, d: F) -> Result<(), PolygonError> {
        let len = self.p.len();
        let s = self
            .p
            .get_mut(n)
            .ok_or(PolygonError::InvalidIndex { index: n, len })?;
        if d == F::zero() {
            return Ok(());
        }

        // Half the offset is applied per adjoining edge.
        let half = d / (F::one() + F::one());
        let first = s.ps[0];
        let mut last = s.ps[s.ps.len() - 1];
        for i in 0..s.ps.len() {
            let mut this = s.ps[i];
            let pre = this;
            let next = if i < s.ps.len() - 1 { s.ps[i + 1] } else { first };

            let into = this - last;
            let r = into.length();
            this.x = this.x + half * into.y / r;
            this.y = this.y - half * into.x / r;

            let out = next - pre;
            let r = out.length();
            this.x = this.x + half * out.y / r;
            this.y = this.y - half * out.x / r;

            s.ps[i] = this;
            last = pre;
        }
        s.recompute_bb();
        Ok(())
    }
}

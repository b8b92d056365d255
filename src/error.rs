//! Error types for polygon operations.

use thiserror::Error;

/// Errors that can occur while constructing or operating on polygons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolygonError {
    /// A polygon was constructed from fewer than three points.
    #[error("polygon requires 3 or more points: got={got}")]
    TooFewPoints {
        /// Number of points supplied.
        got: usize,
    },

    /// A shape index was outside the collection.
    #[error("invalid index {index} but {len} known shapes")]
    InvalidIndex {
        /// The offending index.
        index: usize,
        /// Number of shapes in the collection.
        len: usize,
    },

    /// Scanline generation was requested for a hole.
    #[error("cannot slice shape {index}: it is a hole")]
    SliceOfHole {
        /// Index of the hole.
        index: usize,
    },

    /// A scan level crossed the boundary an odd number of times, even
    /// after nudging the level.
    #[error("odd edge crossings at scan level {level}")]
    OddCrossings {
        /// The scan level that could not be resolved.
        level: f64,
    },

    /// Two points were too close together to define a direction.
    #[error("degenerate input: points too close together")]
    DegeneratePoints,
}

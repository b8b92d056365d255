//! polygonal - 2D polygon boolean algebra
//!
//! A tolerant boolean-geometry engine for simple planar polygons.
//! Counter-clockwise rings are positive regions ("shapes"), clockwise
//! rings are negative regions ("holes"); [`shape::Shapes::union`]
//! combines a collection of them into canonical non-overlapping
//! outlines plus holes.
//!
//! The conventions are those of mathematical graph paper: x increases
//! to the right and y increases up the page (the reverse of typical
//! image formats). All near-equality decisions run under a single
//! tolerance (default `1e-6`), chosen so that coordinates representing
//! millimeters merge anything closer than a thousandth.
//!
//! Around the core algebra sit the collaborators a plotting or milling
//! pipeline needs: scanline rasterisation with hole subtraction
//! ([`shape::Shapes::slice`]), offsetting ([`shape::Shapes::inflate`]),
//! affine transforms, convex hulls, and the [`narrows::narrows`] pinch
//! query.
//!
//! # Example
//!
//! ```
//! use polygonal::shape::Shapes;
//! use polygonal::primitives::Point2;
//!
//! // Two overlapping squares merge into one eight-sided outline.
//! let mut ss: Shapes<f64> = Shapes::new()
//!     .builder(&[
//!         Point2::new(0.0, 0.0),
//!         Point2::new(2.0, 0.0),
//!         Point2::new(2.0, 2.0),
//!         Point2::new(0.0, 2.0),
//!     ])
//!     .builder(&[
//!         Point2::new(1.0, 1.0),
//!         Point2::new(3.0, 1.0),
//!         Point2::new(3.0, 3.0),
//!         Point2::new(1.0, 3.0),
//!     ]);
//! ss.union();
//! assert_eq!(ss.len(), 1);
//! assert_eq!(ss.p[0].ps.len(), 8);
//! ```
//!
//! Input polygons must be simple (non-self-intersecting); the engine
//! does not verify this. The result of a union is a canonical summary,
//! not necessarily a valid input to a further union: straight stretches
//! are compressed along the way, and a later merge may miss crossings
//! that needed the compressed vertices.

mod boolean;
pub mod error;
pub mod hull;
pub mod intersect;
pub mod narrows;
mod offset;
pub mod primitives;
pub mod raster;
pub mod shape;
pub mod tolerance;

pub use error::PolygonError;
pub use hull::convex_hull;
pub use intersect::{intersect, Crossing};
pub use narrows::narrows;
pub use primitives::{Aabb2, Affine2, Point2, Segment2, Vec2};
pub use raster::optimize_lines;
pub use shape::{Shape, Shapes};
pub use tolerance::{match_point, Tolerance};

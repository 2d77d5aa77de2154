//! Voronoi diagrams of planar sites inside a rectangular box, computed with
//! Fortune's sweep-line algorithm.
//!
//! ```
//! use vorosweep::{compute_voronoi, math::Point2};
//!
//! let sites = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Point2::new(5.0, 10.0)];
//! let diagram = compute_voronoi(&sites, 20.0, 20.0)?;
//! assert_eq!(diagram.vertices, vec![Point2::new(5.0, 3.75)]);
//! assert_eq!(diagram.segment_count(), 3);
//! # Ok::<(), vorosweep::VoronoiError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod sweep;

pub use error::{Result, VoronoiError};
pub use operations::{compute_voronoi, ComputeVoronoi, VoronoiConfig, VoronoiDiagram, VoronoiEdge};

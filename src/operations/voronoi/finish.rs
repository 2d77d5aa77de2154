use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::geometry::{Bisector, BoundingBox};
use crate::math::parabola::breakpoint_x;
use crate::math::Point2;
use crate::sweep::{EdgeData, SweepState};

use super::diagram::{VoronoiDiagram, VoronoiEdge};

/// Fraction of the sweep extent added past the last event when probing
/// the growth direction of unbounded edges.
const HORIZON_MARGIN: f64 = 0.1;

/// Turns the state left by a sweep into a clipped [`VoronoiDiagram`].
///
/// # Algorithm
///
/// 1. **Extension**: every edge still traced by a breakpoint of the final
///    beachline is unbounded. The breakpoint is probed past the last event
///    to find which way the edge grows, and the edge is cut where that ray
///    leaves the box.
/// 2. **Clipping**: edges with both endpoints outside the box are dropped;
///    an edge with one endpoint outside has it moved onto the boundary.
#[derive(Debug)]
pub struct FinishDiagram {
    bounds: BoundingBox,
    keep_degenerate_edges: bool,
}

impl FinishDiagram {
    /// Creates a finisher for the given clip box.
    #[must_use]
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            keep_degenerate_edges: false,
        }
    }

    /// Keeps zero-length edges instead of dropping them.
    #[must_use]
    pub fn keep_degenerate_edges(mut self, keep: bool) -> Self {
        self.keep_degenerate_edges = keep;
        self
    }

    /// Executes both passes and assembles the diagram.
    ///
    /// # Errors
    ///
    /// Returns an error if a beachline arc references a missing edge.
    pub fn execute(&self, state: SweepState) -> Result<VoronoiDiagram> {
        let SweepState {
            beachline,
            mut edges,
            vertices,
            stats,
            last_position,
        } = state;
        let mut boundary_vertices = Vec::new();

        if let Some(last) = last_position {
            let horizon = last.y + HORIZON_MARGIN * last.y.abs().max(self.bounds.height());
            for (_, arc) in beachline.iter() {
                if arc.right.is_none() {
                    break;
                }
                let Some(edge_id) = arc.edge_right else {
                    warn!("inner beachline boundary without an edge");
                    continue;
                };
                let edge = edges.edge_mut(edge_id)?;
                if let Some(end) = self.extend(edge, horizon) {
                    self.record(&mut boundary_vertices, end);
                }
            }
        }

        let clipped: Vec<Option<VoronoiEdge>> = edges
            .into_vec()
            .into_iter()
            .map(|edge| self.clip(edge, &mut boundary_vertices))
            .collect();

        debug!(
            edges = clipped.len(),
            kept = clipped.iter().flatten().count(),
            boundary_vertices = boundary_vertices.len(),
            "diagram finished"
        );
        Ok(VoronoiDiagram {
            vertices,
            boundary_vertices,
            edges: clipped,
            stats,
        })
    }

    /// Ends an unbounded edge on the box boundary.
    ///
    /// Returns the new end point when it is a boundary crossing. An edge that
    /// starts outside the box and grows away from it is collapsed onto its
    /// start so the clipping pass drops it.
    #[allow(clippy::float_cmp)]
    fn extend(&self, edge: &mut EdgeData, horizon: f64) -> Option<Point2> {
        let start = edge.start;
        let (width, height) = (self.bounds.width(), self.bounds.height());

        let end = match edge.line {
            Bisector::Vertical { x } => {
                // Level sites only ever separate downward.
                if start.y > height {
                    start
                } else {
                    Point2::new(x, height)
                }
            }
            Bisector::Sloped { slope, intercept } => {
                let x = breakpoint_x(horizon, &edge.left_site, &edge.right_site);
                let y = slope * x + intercept;
                let moving_away = (start.y < 0.0 && y < start.y)
                    || (start.y > height && y > start.y)
                    || (start.x < 0.0 && x < start.x)
                    || (start.x > width && x > start.x);
                if moving_away {
                    start
                } else if slope == 0.0 {
                    let wall = if x - start.x <= 0.0 { 0.0 } else { width };
                    Point2::new(wall, start.y)
                } else {
                    let y_limit = if slope * (x - start.x) <= 0.0 {
                        0.0
                    } else {
                        height
                    };
                    self.bounds
                        .boundary_point(&edge.line, y_limit, &Point2::new(x, y))
                }
            }
        };

        trace!(x = end.x, y = end.y, "unbounded edge extended");
        edge.end = Some(end);
        (end != start).then_some(end)
    }

    /// Clips a finished edge to the box, or drops it.
    #[allow(clippy::float_cmp)]
    fn clip(&self, edge: EdgeData, boundary_vertices: &mut Vec<Point2>) -> Option<VoronoiEdge> {
        let Some(mut end) = edge.end else {
            warn!("edge left without an end point");
            return None;
        };
        let mut start = edge.start;

        match (self.bounds.contains(&start), self.bounds.contains(&end)) {
            (true, true) => {}
            (false, true) => {
                let y_limit = if start.y < end.y {
                    0.0
                } else {
                    self.bounds.height()
                };
                start = self.crossing(&edge.line, y_limit, &start);
                self.record(boundary_vertices, start);
            }
            (true, false) => {
                let y_limit = if end.y < start.y {
                    0.0
                } else {
                    self.bounds.height()
                };
                end = self.crossing(&edge.line, y_limit, &end);
                self.record(boundary_vertices, end);
            }
            (false, false) => {
                trace!(x = start.x, y = start.y, "edge outside the box dropped");
                return None;
            }
        }

        if start == end && !self.keep_degenerate_edges {
            return None;
        }
        Some(VoronoiEdge {
            left_site: edge.left_site,
            right_site: edge.right_site,
            start,
            end,
        })
    }

    /// Boundary crossing toward an outside endpoint, snapped into the box.
    fn crossing(&self, line: &Bisector, y_limit: f64, outside: &Point2) -> Point2 {
        let p = self.bounds.boundary_point(line, y_limit, outside);
        Point2::new(
            p.x.clamp(0.0, self.bounds.width()),
            p.y.clamp(0.0, self.bounds.height()),
        )
    }

    fn record(&self, boundary_vertices: &mut Vec<Point2>, p: Point2) {
        if self.bounds.contains(&p) {
            boundary_vertices.push(p);
        }
    }
}

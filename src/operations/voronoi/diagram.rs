use crate::math::Point2;
use crate::sweep::SweepStats;

/// A finished Voronoi edge, clipped to the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiEdge {
    /// Site on the left of the edge as the sweep traced it.
    pub left_site: Point2,
    /// Site on the right of the edge as the sweep traced it.
    pub right_site: Point2,
    pub start: Point2,
    pub end: Point2,
}

impl VoronoiEdge {
    /// Returns `true` if `p` is one of the two endpoints.
    #[must_use]
    pub fn touches(&self, p: &Point2) -> bool {
        self.start == *p || self.end == *p
    }
}

/// The Voronoi diagram of a site set inside a box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoronoiDiagram {
    /// Vertices produced by circle events inside the box.
    pub vertices: Vec<Point2>,
    /// Points where edges were cut by the box boundary.
    pub boundary_vertices: Vec<Point2>,
    /// Edges in creation order; `None` marks an edge dropped by clipping.
    pub edges: Vec<Option<VoronoiEdge>>,
    pub stats: SweepStats,
}

impl VoronoiDiagram {
    /// Iterates over the edges that survived clipping.
    pub fn segments(&self) -> impl Iterator<Item = &VoronoiEdge> {
        self.edges.iter().flatten()
    }

    /// Returns the number of edges that survived clipping.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Returns `true` when the diagram has neither vertices nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

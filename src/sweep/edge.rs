use crate::error::SweepError;
use crate::geometry::Bisector;
use crate::math::Point2;

/// Stable index of an edge in an [`EdgeStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Returns the position of the edge in creation order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A Voronoi edge under construction.
///
/// The site pair and the supporting line never change once created; only
/// the endpoints are moved by the sweep and the finisher.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    /// Site whose arc lies left of the breakpoint tracing this edge.
    pub left_site: Point2,
    /// Site whose arc lies right of the breakpoint tracing this edge.
    pub right_site: Point2,
    /// Perpendicular bisector of the two sites.
    pub line: Bisector,
    /// Where the edge starts growing.
    pub start: Point2,
    /// Set by a circle event or by the finisher.
    pub end: Option<Point2>,
}

impl EdgeData {
    /// Creates an open edge between two sites starting at `start`.
    #[must_use]
    pub fn new(left_site: Point2, right_site: Point2, start: Point2) -> Self {
        Self {
            left_site,
            right_site,
            line: Bisector::between(&left_site, &right_site),
            start,
            end: None,
        }
    }
}

/// Append-only edge storage; an [`EdgeId`] stays valid for the whole sweep.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: Vec<EdgeData>,
}

impl EdgeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edge and returns its ID.
    pub fn add(&mut self, data: EdgeData) -> EdgeId {
        self.edges.push(data);
        EdgeId(self.edges.len() - 1)
    }

    /// Returns the number of edges created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no edge has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID does not belong to this store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, SweepError> {
        self.edges
            .get(id.0)
            .ok_or(SweepError::EntityNotFound("edge"))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID does not belong to this store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, SweepError> {
        self.edges
            .get_mut(id.0)
            .ok_or(SweepError::EntityNotFound("edge"))
    }

    /// Iterates over the edges in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    /// Consumes the store, returning the edges in creation order.
    #[must_use]
    pub fn into_vec(self) -> Vec<EdgeData> {
        self.edges
    }
}

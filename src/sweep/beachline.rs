use slotmap::SlotMap;

use crate::error::SweepError;
use crate::math::parabola::breakpoint_x;
use crate::math::Point2;

use super::edge::EdgeId;
use super::event::CircleEventId;

slotmap::new_key_type! {
    /// Unique identifier for an arc on the beachline.
    pub struct ArcId;
}

/// One parabolic arc of the beachline.
///
/// Arcs form a doubly linked list through `left`/`right`. The edges traced
/// by the breakpoints on either side are referenced, not owned.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcData {
    /// The site this arc belongs to.
    pub focus: Point2,
    pub left: Option<ArcId>,
    pub right: Option<ArcId>,
    pub edge_left: Option<EdgeId>,
    pub edge_right: Option<EdgeId>,
    /// The single live circle event that would remove this arc, if any.
    pub circle_event: Option<CircleEventId>,
}

impl ArcData {
    /// Creates an unlinked arc with no edges.
    #[must_use]
    pub fn new(focus: Point2) -> Self {
        Self {
            focus,
            left: None,
            right: None,
            edge_left: None,
            edge_right: None,
            circle_event: None,
        }
    }
}

/// The ordered left-to-right sequence of arcs.
///
/// Arcs live in a slot map, so removing one never invalidates the IDs held
/// by its neighbours or by queued circle events.
#[derive(Debug, Clone, Default)]
pub struct Beachline {
    arcs: SlotMap<ArcId, ArcData>,
    head: Option<ArcId>,
}

impl Beachline {
    /// Creates an empty beachline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` before the first site event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Returns a reference to the arc data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc was removed or never existed.
    pub fn arc(&self, id: ArcId) -> Result<&ArcData, SweepError> {
        self.arcs.get(id).ok_or(SweepError::EntityNotFound("arc"))
    }

    /// Returns a mutable reference to the arc data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc was removed or never existed.
    pub fn arc_mut(&mut self, id: ArcId) -> Result<&mut ArcData, SweepError> {
        self.arcs
            .get_mut(id)
            .ok_or(SweepError::EntityNotFound("arc"))
    }

    /// Starts the beachline with a single arc, replacing any previous content.
    pub fn init(&mut self, focus: Point2) -> ArcId {
        self.arcs.clear();
        let id = self.arcs.insert(ArcData::new(focus));
        self.head = Some(id);
        id
    }

    /// Finds the arc lying above `site` when the sweep line reaches it.
    ///
    /// Walks left to right while the breakpoint between the current arc and
    /// its right neighbour is at or before `site.x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the beachline is empty or its links are broken.
    pub fn locate(&self, site: &Point2) -> Result<ArcId, SweepError> {
        let mut current = self.head.ok_or(SweepError::EntityNotFound("beachline head"))?;
        loop {
            let arc = self.arc(current)?;
            let Some(right) = arc.right else {
                return Ok(current);
            };
            let right_focus = self.arc(right)?.focus;
            if breakpoint_x(site.y, &arc.focus, &right_focus) <= site.x {
                current = right;
            } else {
                return Ok(current);
            }
        }
    }

    /// Links a new arc immediately right of `at` and returns its ID.
    ///
    /// Only the neighbour links are set; edges are the caller's business.
    ///
    /// # Errors
    ///
    /// Returns an error if `at` is not on the beachline.
    pub fn insert_after(&mut self, at: ArcId, mut data: ArcData) -> Result<ArcId, SweepError> {
        let next = self.arc(at)?.right;
        data.left = Some(at);
        data.right = next;
        let id = self.arcs.insert(data);
        if let Some(next) = next {
            self.arc_mut(next)?.left = Some(id);
        }
        self.arc_mut(at)?.right = Some(id);
        Ok(id)
    }

    /// Splices an arc out, linking its neighbours to each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc is not on the beachline.
    pub fn remove(&mut self, id: ArcId) -> Result<ArcData, SweepError> {
        let data = self
            .arcs
            .remove(id)
            .ok_or(SweepError::EntityNotFound("arc"))?;
        if let Some(left) = data.left {
            self.arc_mut(left)?.right = data.right;
        }
        if let Some(right) = data.right {
            self.arc_mut(right)?.left = data.left;
        }
        if self.head == Some(id) {
            self.head = data.right;
        }
        Ok(data)
    }

    /// Iterates over the arcs from left to right.
    #[must_use]
    pub fn iter(&self) -> Arcs<'_> {
        Arcs {
            beachline: self,
            next: self.head,
        }
    }
}

/// Left-to-right iterator over a [`Beachline`].
#[derive(Debug)]
pub struct Arcs<'a> {
    beachline: &'a Beachline,
    next: Option<ArcId>,
}

impl<'a> Iterator for Arcs<'a> {
    type Item = (ArcId, &'a ArcData);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let arc = self.beachline.arcs.get(id)?;
        self.next = arc.right;
        Some((id, arc))
    }
}

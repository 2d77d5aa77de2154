use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::error::SweepError;
use crate::geometry::{Bisector, BoundingBox};
use crate::math::parabola::breakpoint_x;
use crate::math::predicates_2d::is_clockwise;
use crate::math::Point2;

use super::beachline::{ArcData, ArcId, Beachline};
use super::edge::{EdgeData, EdgeStore};
use super::event::{CircleEvent, CircleEventId, Event, EventQueue};

/// Counters collected during one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Site events handled.
    pub site_events: usize,
    /// Circle events accepted into the queue.
    pub circle_events_scheduled: usize,
    /// Scheduled circle events later deactivated.
    pub circle_events_cancelled: usize,
    /// Active circle events popped and handled, one Voronoi vertex each.
    pub circle_events_processed: usize,
    /// Sites landing exactly on a breakpoint, one Voronoi vertex each.
    pub breakpoint_sites: usize,
}

/// Everything the sweep leaves behind for the finisher.
#[derive(Debug, Clone)]
pub struct SweepState {
    /// Final beachline; its inner boundaries are the unbounded edges.
    pub beachline: Beachline,
    /// All edges in creation order.
    pub edges: EdgeStore,
    /// Circle-event vertices lying inside the box.
    pub vertices: Vec<Point2>,
    pub stats: SweepStats,
    /// Trigger position of the last popped event, `None` without sites.
    pub last_position: Option<Point2>,
}

/// Fortune's sweep over a set of sites.
///
/// One engine runs one sweep: create it, call [`SweepEngine::run`], and
/// hand the resulting [`SweepState`] to the finisher. No state survives
/// between computations.
#[derive(Debug)]
pub struct SweepEngine {
    bounds: BoundingBox,
    queue: EventQueue,
    beachline: Beachline,
    circles: SlotMap<CircleEventId, CircleEvent>,
    edges: EdgeStore,
    vertices: Vec<Point2>,
    stats: SweepStats,
    last_position: Option<Point2>,
}

impl SweepEngine {
    /// Creates an engine clipping vertices against `bounds`.
    #[must_use]
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            queue: EventQueue::new(),
            beachline: Beachline::new(),
            circles: SlotMap::with_key(),
            edges: EdgeStore::new(),
            vertices: Vec::new(),
            stats: SweepStats::default(),
            last_position: None,
        }
    }

    /// Sweeps over `sites` until the event queue drains.
    ///
    /// Sites must be finite and pairwise distinct.
    ///
    /// # Errors
    ///
    /// Returns an error if the beachline's internal links become inconsistent.
    pub fn run(mut self, sites: &[Point2]) -> Result<SweepState, SweepError> {
        debug!(
            sites = sites.len(),
            width = self.bounds.width(),
            height = self.bounds.height(),
            "starting sweep"
        );
        for site in sites {
            self.queue.insert(*site, Event::Site(*site));
        }

        while let Some((position, event)) = self.queue.pop_min() {
            self.last_position = Some(position);
            match event {
                Event::Site(site) => self.handle_site_event(site)?,
                Event::Circle(id) => {
                    let Some(circle) = self.circles.remove(id) else {
                        continue;
                    };
                    if circle.active {
                        self.handle_circle_event(&circle)?;
                    }
                }
            }
        }

        debug!(
            edges = self.edges.len(),
            vertices = self.vertices.len(),
            arcs = self.beachline.len(),
            circle_events = self.stats.circle_events_processed,
            "sweep finished"
        );
        Ok(SweepState {
            beachline: self.beachline,
            edges: self.edges,
            vertices: self.vertices,
            stats: self.stats,
            last_position: self.last_position,
        })
    }

    fn handle_site_event(&mut self, site: Point2) -> Result<(), SweepError> {
        self.stats.site_events += 1;
        trace!(x = site.x, y = site.y, "site event");

        if self.beachline.is_empty() {
            self.beachline.init(site);
            return Ok(());
        }

        let q = self.beachline.locate(&site)?;
        let q_arc = self.beachline.arc(q)?.clone();
        if let Some(left) = q_arc.left {
            if self.insert_at_breakpoint(left, q, site)? {
                return Ok(());
            }
        }
        let line = Bisector::between(&q_arc.focus, &site);

        // A focus level with the site only exists while every arc so far
        // shares the minimum y; the vertical bisector then has no breakpoint
        // below the site.
        let Some(start) = line.point_at_x(site.x) else {
            return self.append_level_site(q, &q_arc, site);
        };

        let e_qp = self.edges.add(EdgeData::new(q_arc.focus, site, start));
        let e_pq = self.edges.add(EdgeData::new(site, q_arc.focus, start));

        let mut middle = ArcData::new(site);
        middle.edge_left = Some(e_qp);
        middle.edge_right = Some(e_pq);
        let mut copy = ArcData::new(q_arc.focus);
        copy.edge_left = Some(e_pq);
        copy.edge_right = q_arc.edge_right;

        let middle_id = self.beachline.insert_after(q, middle)?;
        let copy_id = self.beachline.insert_after(middle_id, copy)?;
        self.beachline.arc_mut(q)?.edge_right = Some(e_qp);

        self.cancel_circle_event(q)?;
        self.add_circle_event(&site, q)?;
        self.add_circle_event(&site, copy_id)?;
        Ok(())
    }

    /// Inserts `site` between `left` and `right` when it lies exactly below
    /// their breakpoint.
    ///
    /// The edge traced by that breakpoint ends at the vertex equidistant from
    /// both foci and the site, and two new edges grow from there. Returns
    /// `false` without touching anything when the site misses the breakpoint.
    #[allow(clippy::float_cmp)]
    fn insert_at_breakpoint(
        &mut self,
        left: ArcId,
        right: ArcId,
        site: Point2,
    ) -> Result<bool, SweepError> {
        let left_arc = self.beachline.arc(left)?;
        let left_focus = left_arc.focus;
        let Some(traced) = left_arc.edge_right else {
            return Ok(false);
        };
        let right_focus = self.beachline.arc(right)?.focus;
        if breakpoint_x(site.y, &left_focus, &right_focus) != site.x {
            return Ok(false);
        }
        let line = self.edges.edge(traced)?.line;
        let Some(vertex) = line.intersect(&Bisector::between(&left_focus, &site)) else {
            return Ok(false);
        };

        self.stats.breakpoint_sites += 1;
        trace!(x = vertex.x, y = vertex.y, "site on a breakpoint");

        self.cancel_circle_event(left)?;
        self.cancel_circle_event(right)?;
        self.edges.edge_mut(traced)?.end = Some(vertex);
        if self.bounds.contains(&vertex) {
            self.vertices.push(vertex);
        }

        let e_left = self.edges.add(EdgeData::new(left_focus, site, vertex));
        let e_right = self.edges.add(EdgeData::new(site, right_focus, vertex));
        let mut middle = ArcData::new(site);
        middle.edge_left = Some(e_left);
        middle.edge_right = Some(e_right);
        self.beachline.insert_after(left, middle)?;
        self.beachline.arc_mut(left)?.edge_right = Some(e_left);
        self.beachline.arc_mut(right)?.edge_left = Some(e_right);

        self.add_circle_event(&site, left)?;
        self.add_circle_event(&site, right)?;
        Ok(true)
    }

    /// Appends `site` right of `q`, separated by a vertical bisector that
    /// grows downward from the top of the box.
    fn append_level_site(
        &mut self,
        q: ArcId,
        q_arc: &ArcData,
        site: Point2,
    ) -> Result<(), SweepError> {
        let start = Point2::new((q_arc.focus.x + site.x) / 2.0, site.y.min(0.0));
        let edge = self.edges.add(EdgeData::new(q_arc.focus, site, start));

        let mut arc = ArcData::new(site);
        arc.edge_left = Some(edge);
        arc.edge_right = q_arc.edge_right;
        self.beachline.insert_after(q, arc)?;
        self.beachline.arc_mut(q)?.edge_right = Some(edge);
        Ok(())
    }

    fn handle_circle_event(&mut self, circle: &CircleEvent) -> Result<(), SweepError> {
        let arc = self.beachline.arc(circle.arc)?.clone();
        let (Some(left), Some(right)) = (arc.left, arc.right) else {
            warn!(x = circle.vertex.x, y = circle.vertex.y, "circle event on a boundary arc");
            return Ok(());
        };
        self.stats.circle_events_processed += 1;
        trace!(x = circle.vertex.x, y = circle.vertex.y, "circle event");

        let vertex = circle.vertex;
        let left_focus = self.beachline.arc(left)?.focus;
        let right_focus = self.beachline.arc(right)?.focus;
        let edge = self.edges.add(EdgeData::new(left_focus, right_focus, vertex));

        self.cancel_circle_event(left)?;
        self.cancel_circle_event(right)?;

        self.beachline.remove(circle.arc)?;
        self.beachline.arc_mut(left)?.edge_right = Some(edge);
        self.beachline.arc_mut(right)?.edge_left = Some(edge);

        for bounding in [arc.edge_left, arc.edge_right].into_iter().flatten() {
            self.edges.edge_mut(bounding)?.end = Some(vertex);
        }

        if self.bounds.contains(&vertex) {
            self.vertices.push(vertex);
        }

        self.add_circle_event(&circle.position, left)?;
        self.add_circle_event(&circle.position, right)?;
        Ok(())
    }

    /// Schedules the circle event that would remove `arc_id`, if its foci
    /// and those of its neighbours converge no earlier than `trigger`.
    fn add_circle_event(&mut self, trigger: &Point2, arc_id: ArcId) -> Result<(), SweepError> {
        let arc = self.beachline.arc(arc_id)?;
        let (Some(left), Some(right)) = (arc.left, arc.right) else {
            return Ok(());
        };
        let a = self.beachline.arc(left)?.focus;
        let b = arc.focus;
        let c = self.beachline.arc(right)?.focus;
        if !is_clockwise(&a, &b, &c) {
            return Ok(());
        }

        let (Some(edge_left), Some(edge_right)) = (arc.edge_left, arc.edge_right) else {
            return Ok(());
        };
        let line_left = self.edges.edge(edge_left)?.line;
        let line_right = self.edges.edge(edge_right)?.line;
        let Some(vertex) = line_left.intersect(&line_right) else {
            return Ok(());
        };

        let radius = (vertex - b).norm();
        let event_y = vertex.y + radius;
        let accepted = event_y >= trigger.y && vertex.y < self.bounds.height();
        if !accepted {
            trace!(x = vertex.x, y = vertex.y, event_y, "circle event rejected");
            return Ok(());
        }

        self.cancel_circle_event(arc_id)?;
        let position = Point2::new(vertex.x, event_y);
        let id = self.circles.insert(CircleEvent {
            position,
            arc: arc_id,
            vertex,
            active: true,
        });
        self.beachline.arc_mut(arc_id)?.circle_event = Some(id);
        self.queue.insert(position, Event::Circle(id));
        self.stats.circle_events_scheduled += 1;
        trace!(x = vertex.x, y = vertex.y, event_y, "circle event scheduled");
        Ok(())
    }

    /// Deactivates the live circle event of `arc_id`, if it has one.
    fn cancel_circle_event(&mut self, arc_id: ArcId) -> Result<(), SweepError> {
        let Some(id) = self.beachline.arc_mut(arc_id)?.circle_event.take() else {
            return Ok(());
        };
        if let Some(circle) = self.circles.get_mut(id) {
            if circle.active {
                circle.active = false;
                self.stats.circle_events_cancelled += 1;
                trace!(x = circle.vertex.x, y = circle.vertex.y, "circle event cancelled");
            }
        }
        Ok(())
    }
}

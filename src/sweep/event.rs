use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::math::Point2;

use super::beachline::ArcId;

slotmap::new_key_type! {
    /// Unique identifier for a scheduled circle event.
    pub struct CircleEventId;
}

/// A circle event: the moment an arc shrinks to zero width.
///
/// Cancelled events stay queued with `active == false` and are skipped
/// when popped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEvent {
    /// Lowest point of the circumscribed circle (where it is triggered).
    pub position: Point2,
    /// The arc that vanishes.
    pub arc: ArcId,
    /// Circumcenter of the three foci, the new Voronoi vertex.
    pub vertex: Point2,
    /// Cleared when the configuration that produced the event is broken.
    pub active: bool,
}

/// An entry of the event queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The sweep line reaches a site.
    Site(Point2),
    /// A circle event, stored in the engine's circle event arena.
    Circle(CircleEventId),
}

#[derive(Debug, Clone, Copy)]
struct QueuedEvent {
    position: Point2,
    seq: u64,
    event: Event,
}

impl QueuedEvent {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.position
            .y
            .total_cmp(&other.position.y)
            .then_with(|| self.position.x.total_cmp(&other.position.x))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key_cmp(other)
    }
}

/// Priority queue of sweep events.
///
/// Events pop in increasing `y` (the sweep direction), then increasing `x`;
/// exact ties pop in insertion order.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<QueuedEvent>>,
    next_seq: u64,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pending events, cancelled ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` when no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queues `event`, triggered when the sweep reaches `position`.
    pub fn insert(&mut self, position: Point2, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(QueuedEvent {
            position,
            seq,
            event,
        }));
    }

    /// Removes and returns the earliest event with its trigger position.
    pub fn pop_min(&mut self) -> Option<(Point2, Event)> {
        self.heap
            .pop()
            .map(|Reverse(queued)| (queued.position, queued.event))
    }
}

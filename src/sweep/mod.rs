//! Fortune's sweep-line algorithm.
//!
//! The sweep line moves toward increasing `y` (screen coordinates). Arcs,
//! edges and circle events reference each other by stable IDs into arenas
//! owned by one [`SweepEngine`].

pub mod beachline;
pub mod edge;
pub mod engine;
pub mod event;

pub use beachline::{ArcData, ArcId, Beachline};
pub use edge::{EdgeData, EdgeId, EdgeStore};
pub use engine::{SweepEngine, SweepState, SweepStats};
pub use event::{CircleEvent, CircleEventId, Event, EventQueue};

pub mod bisector;
pub mod bounds;

pub use bisector::Bisector;
pub use bounds::BoundingBox;

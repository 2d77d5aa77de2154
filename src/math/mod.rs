pub mod parabola;
pub mod predicates_2d;

/// 2D point type. Sites, vertices and event positions all use it.
pub type Point2 = nalgebra::Point2<f64>;

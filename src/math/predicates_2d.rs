use super::Point2;

/// Computes the 2D cross product `(b - a) × (c - a)`.
///
/// The sweep works in screen coordinates (y grows downward), so a positive
/// value means `a -> b -> c` turns clockwise on screen.
#[must_use]
pub fn cross_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Returns `true` if the triple turns clockwise (strictly positive cross product).
///
/// Only such a triple of consecutive arc foci can converge to a single
/// circumcenter as the sweep line advances. Collinear triples return `false`.
#[must_use]
pub fn is_clockwise(a: &Point2, b: &Point2, c: &Point2) -> bool {
    cross_2d(a, b, c) > 0.0
}

//! Parabolic arcs of the beachline.
//!
//! Every arc is the parabola of points equidistant from its focus (a site)
//! and the sweep line `y = directrix`. Foci lie at or above the directrix
//! in screen coordinates, so `focus.y <= directrix`.

use super::Point2;

/// Returns the x coordinate of the breakpoint between the arc of `left`
/// and the arc of `right` when the sweep line sits at `directrix`.
///
/// Foci with equal y meet at their midpoint. Otherwise the quadratic from
/// equating both parabolas is solved and the root for which `left`'s arc
/// lies on the left is returned; it tends continuously to the midpoint as
/// the two y coordinates approach each other. A focus lying on the
/// directrix is a degenerate vertical ray and yields its own x.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn breakpoint_x(directrix: f64, left: &Point2, right: &Point2) -> f64 {
    let dy = left.y - right.y;
    if dy == 0.0 {
        return (left.x + right.x) / 2.0;
    }
    let dx = left.x - right.x;
    let d_left = left.y - directrix;
    let d_right = right.y - directrix;
    let base = (-left.x * d_right + right.x * d_left) / dy;
    let spread = (d_left * d_right * (dx * dx + dy * dy)).sqrt() / dy;
    base + spread
}

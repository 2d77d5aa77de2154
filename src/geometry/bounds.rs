use crate::error::InputError;
use crate::math::Point2;

use super::Bisector;

/// The axis-aligned clip box `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    width: f64,
    height: f64,
}

impl BoundingBox {
    /// Creates a clip box.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidBox` unless both dimensions are positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self, InputError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(InputError::InvalidBox { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the box width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the box height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns `true` if `p` lies in the closed box.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Finds where `line` meets the box boundary, heading toward `y_limit`
    /// (either `0` or `height`) from a point inside the box.
    ///
    /// The line is evaluated at `y_limit`; if that crossing falls beyond a
    /// side wall, x is clamped to the wall and y recomputed. A horizontal line
    /// never reaches `y_limit`, so it is clamped to the wall on the side of
    /// `toward` instead.
    #[must_use]
    pub fn boundary_point(&self, line: &Bisector, y_limit: f64, toward: &Point2) -> Point2 {
        match *line {
            Bisector::Vertical { x } => Point2::new(x, y_limit),
            Bisector::Sloped { intercept, .. } if line.is_horizontal() => {
                let x = if toward.x < 0.0 { 0.0 } else { self.width };
                Point2::new(x, intercept)
            }
            Bisector::Sloped { slope, intercept } => {
                let x = ((y_limit - intercept) / slope).clamp(0.0, self.width);
                Point2::new(x, slope * x + intercept)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn rejects_degenerate_boxes() {
        assert!(BoundingBox::new(0.0, 10.0).is_err());
        assert!(BoundingBox::new(10.0, -1.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 10.0).is_err());
        assert!(BoundingBox::new(f64::INFINITY, 10.0).is_err());
        assert_eq!(
            BoundingBox::new(-2.0, 3.0),
            Err(InputError::InvalidBox {
                width: -2.0,
                height: 3.0
            })
        );
    }

    #[test]
    fn contains_is_closed() {
        let bbox = BoundingBox::new(20.0, 10.0).unwrap();
        assert!(bbox.contains(&Point2::new(0.0, 0.0)));
        assert!(bbox.contains(&Point2::new(20.0, 10.0)));
        assert!(!bbox.contains(&Point2::new(20.000_001, 5.0)));
        assert!(!bbox.contains(&Point2::new(5.0, -0.1)));
    }

    #[test]
    fn boundary_point_through_bottom() {
        let bbox = BoundingBox::new(20.0, 20.0).unwrap();
        let line = Bisector::Sloped {
            slope: 2.0,
            intercept: 0.0,
        };
        let p = bbox.boundary_point(&line, 20.0, &Point2::new(12.0, 24.0));
        assert_relative_eq!(p.x, 10.0);
        assert_relative_eq!(p.y, 20.0);
    }

    #[test]
    fn boundary_point_clamps_to_side_wall() {
        let bbox = BoundingBox::new(20.0, 20.0).unwrap();
        let line = Bisector::Sloped {
            slope: 0.5,
            intercept: 1.25,
        };
        let p = bbox.boundary_point(&line, 20.0, &Point2::new(37.5, 20.0));
        assert_relative_eq!(p.x, 20.0);
        assert_relative_eq!(p.y, 11.25);
    }

    #[test]
    fn boundary_point_for_axis_aligned_lines() {
        let bbox = BoundingBox::new(20.0, 20.0).unwrap();
        let vertical = bbox.boundary_point(&Bisector::Vertical { x: 5.0 }, 0.0, &Point2::new(5.0, -3.0));
        assert_eq!(vertical, Point2::new(5.0, 0.0));

        let horizontal = Bisector::Sloped {
            slope: 0.0,
            intercept: 7.0,
        };
        let left = bbox.boundary_point(&horizontal, 20.0, &Point2::new(-4.0, 7.0));
        assert_eq!(left, Point2::new(0.0, 7.0));
        let right = bbox.boundary_point(&horizontal, 20.0, &Point2::new(40.0, 7.0));
        assert_eq!(right, Point2::new(20.0, 7.0));
    }
}

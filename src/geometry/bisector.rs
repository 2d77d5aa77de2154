use crate::math::Point2;

/// The perpendicular bisector of two sites, carrying one Voronoi edge.
///
/// Sites with different y give a sloped line `y = slope * x + intercept`.
/// Sites sharing a y give a vertical line, stored by its x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bisector {
    /// `y = slope * x + intercept`.
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`.
    Vertical { x: f64 },
}

impl Bisector {
    /// Builds the bisector of `a` and `b`.
    ///
    /// The two points must be distinct; coincident sites are rejected before
    /// the sweep ever builds a bisector.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn between(a: &Point2, b: &Point2) -> Self {
        let dy = a.y - b.y;
        if dy == 0.0 {
            return Self::Vertical {
                x: (a.x + b.x) / 2.0,
            };
        }
        let slope = -(a.x - b.x) / dy;
        let intercept = 0.5 * (a.x * a.x - b.x * b.x + a.y * a.y - b.y * b.y) / dy;
        Self::Sloped { slope, intercept }
    }

    /// Returns `true` for a vertical bisector.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Self::Vertical { .. })
    }

    /// Returns `true` for a horizontal bisector (sites stacked on one x).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Sloped { slope, .. } if *slope == 0.0)
    }

    /// Evaluates `y` at `x`. `None` for a vertical bisector.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Self::Sloped { slope, intercept } => Some(slope * x + intercept),
            Self::Vertical { .. } => None,
        }
    }

    /// Returns the point on this bisector with the given x, or `None` if the
    /// bisector is vertical.
    #[must_use]
    pub fn point_at_x(&self, x: f64) -> Option<Point2> {
        self.y_at(x).map(|y| Point2::new(x, y))
    }

    /// Intersects two bisectors.
    ///
    /// Returns `None` when they are parallel (equal slopes or both vertical).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn intersect(&self, other: &Self) -> Option<Point2> {
        match (*self, *other) {
            (Self::Vertical { .. }, Self::Vertical { .. }) => None,
            (Self::Vertical { x }, _) => other.point_at_x(x),
            (_, Self::Vertical { x }) => self.point_at_x(x),
            (
                Self::Sloped {
                    slope: m1,
                    intercept: q1,
                },
                Self::Sloped {
                    slope: m2,
                    intercept: q2,
                },
            ) => {
                let slope_diff = m1 - m2;
                if slope_diff == 0.0 {
                    return None;
                }
                let x = (q2 - q1) / slope_diff;
                Some(Point2::new(x, m1 * x + q1))
            }
        }
    }
}

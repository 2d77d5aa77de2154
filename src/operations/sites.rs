use std::cmp::Ordering;

use crate::error::{InputError, Result};
use crate::geometry::BoundingBox;
use crate::math::Point2;

/// Separation under which pointer-picked sites are treated as the same click.
pub const DEFAULT_MIN_SITE_SEPARATION: f64 = 3.0;

/// Validates and orders the sites fed to the sweep.
///
/// Rejects non-finite coordinates and, when given a box, sites outside it.
/// Optionally drops sites closer than a minimum separation to an earlier
/// kept site, then sorts the rest by `(y, x)`. Sorting first makes the
/// diagram independent of input order.
#[derive(Debug)]
pub struct PrepareSites {
    sites: Vec<Point2>,
    bounds: Option<BoundingBox>,
    min_separation: Option<f64>,
}

impl PrepareSites {
    /// Creates a preparation step keeping every distinct site.
    #[must_use]
    pub fn new(sites: Vec<Point2>) -> Self {
        Self {
            sites,
            bounds: None,
            min_separation: None,
        }
    }

    /// Requires every site to lie in the closed box.
    #[must_use]
    pub fn within(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Drops sites closer than `distance` to a site kept before them.
    #[must_use]
    pub fn with_min_separation(mut self, distance: f64) -> Self {
        self.min_separation = Some(distance);
        self
    }

    /// Executes the preparation, returning sites sorted by `(y, x)`.
    ///
    /// # Errors
    ///
    /// - `InputError::NonFiniteSite` if a coordinate is NaN or infinite
    /// - `InputError::SiteOutsideBox` if a box was given and a site lies outside it
    /// - `InputError::InvalidSeparation` if the separation is negative or not finite
    /// - `InputError::CoincidentSites` if two kept sites are identical
    pub fn execute(&self) -> Result<Vec<Point2>> {
        if let Some(index) = self
            .sites
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(InputError::NonFiniteSite { index }.into());
        }
        if let Some(bounds) = self.bounds {
            if let Some(index) = self.sites.iter().position(|p| !bounds.contains(p)) {
                return Err(InputError::SiteOutsideBox { index }.into());
            }
        }

        let kept = match self.min_separation {
            Some(d) if !(d.is_finite() && d >= 0.0) => {
                return Err(InputError::InvalidSeparation(d).into());
            }
            Some(d) => self.separated(d),
            None => self.sites.iter().copied().enumerate().collect(),
        };

        // Fold -0.0 into 0.0 so equal coordinates sort next to each other.
        let mut ordered: Vec<(usize, Point2)> = kept
            .into_iter()
            .map(|(i, p)| (i, Point2::new(p.x + 0.0, p.y + 0.0)))
            .collect();
        ordered.sort_by(|(_, a), (_, b)| sweep_order(a, b));

        if let Some(pair) = ordered.windows(2).find(|w| w[0].1 == w[1].1) {
            let (a, b) = (pair[0].0, pair[1].0);
            return Err(InputError::CoincidentSites {
                first: a.min(b),
                second: a.max(b),
            }
            .into());
        }

        Ok(ordered.into_iter().map(|(_, p)| p).collect())
    }

    fn separated(&self, distance: f64) -> Vec<(usize, Point2)> {
        let mut kept: Vec<(usize, Point2)> = Vec::with_capacity(self.sites.len());
        for (i, &p) in self.sites.iter().enumerate() {
            if kept.iter().all(|(_, q)| (p - *q).norm() >= distance) {
                kept.push((i, p));
            }
        }
        kept
    }
}

/// Orders points the way the sweep line meets them: by `y`, then `x`.
#[must_use]
pub fn sweep_order(a: &Point2, b: &Point2) -> Ordering {
    a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x))
}

mod diagram;
mod finish;

pub use diagram::{VoronoiDiagram, VoronoiEdge};
pub use finish::FinishDiagram;

use tracing::debug;

use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::math::Point2;
use crate::sweep::SweepEngine;

use super::sites::PrepareSites;

/// Tunables for [`ComputeVoronoi`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VoronoiConfig {
    /// Drop sites closer than this to an earlier site instead of rejecting
    /// exact duplicates. See [`super::sites::DEFAULT_MIN_SITE_SEPARATION`].
    pub min_site_separation: Option<f64>,
    /// Keep zero-length edges in the output.
    pub keep_degenerate_edges: bool,
}

/// Computes the Voronoi diagram of a site set clipped to `[0, width] x [0, height]`.
///
/// Coordinates are screen-like: the sweep line moves toward increasing `y`.
/// Each call builds a fresh sweep; nothing is shared between computations.
#[derive(Debug)]
pub struct ComputeVoronoi {
    sites: Vec<Point2>,
    width: f64,
    height: f64,
    config: VoronoiConfig,
}

impl ComputeVoronoi {
    /// Creates a new Voronoi computation.
    #[must_use]
    pub fn new(sites: Vec<Point2>, width: f64, height: f64) -> Self {
        Self {
            sites,
            width,
            height,
            config: VoronoiConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: VoronoiConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the sweep and the finishing passes.
    ///
    /// Sites must lie in the closed box. Zero or one site yields an empty
    /// diagram.
    ///
    /// # Errors
    ///
    /// - `InputError::InvalidBox` if a box dimension is not positive and finite
    /// - `InputError::NonFiniteSite`, `InputError::SiteOutsideBox` or
    ///   `InputError::CoincidentSites` for bad sites
    /// - `InputError::InvalidSeparation` for a bad configured separation
    pub fn execute(&self) -> Result<VoronoiDiagram> {
        let bounds = BoundingBox::new(self.width, self.height)?;

        let mut prepare = PrepareSites::new(self.sites.clone()).within(bounds);
        if let Some(distance) = self.config.min_site_separation {
            prepare = prepare.with_min_separation(distance);
        }
        let sites = prepare.execute()?;
        debug!(
            input = self.sites.len(),
            sites = sites.len(),
            "computing voronoi diagram"
        );

        let state = SweepEngine::new(bounds).run(&sites)?;
        FinishDiagram::new(bounds)
            .keep_degenerate_edges(self.config.keep_degenerate_edges)
            .execute(state)
    }
}

/// Computes the Voronoi diagram of `sites` inside a `width` x `height` box.
///
/// # Errors
///
/// See [`ComputeVoronoi::execute`].
pub fn compute_voronoi(sites: &[Point2], width: f64, height: f64) -> Result<VoronoiDiagram> {
    ComputeVoronoi::new(sites.to_vec(), width, height).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use spade::{DelaunayTriangulation, Triangulation};

    use super::*;
    use crate::error::{InputError, VoronoiError};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn random_sites(seed: u64, n: usize, width: f64, height: f64) -> Vec<Point2> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)))
            .collect()
    }

    fn close(a: &Point2, b: &Point2) -> bool {
        abs_diff_eq!(a.x, b.x, epsilon = 1e-6) && abs_diff_eq!(a.y, b.y, epsilon = 1e-6)
    }

    /// Checks that no site is strictly closer than an edge's own two sites
    /// anywhere inside the edge.
    fn assert_edges_separate_nearest_sites(diagram: &VoronoiDiagram, sites: &[Point2]) {
        for edge in diagram.segments() {
            for t in [0.25, 0.5, 0.75] {
                let p = edge.start + (edge.end - edge.start) * t;
                let own = (p - edge.left_site).norm();
                assert!(
                    abs_diff_eq!(own, (p - edge.right_site).norm(), epsilon = 1e-6),
                    "{edge:?}"
                );
                let nearest = sites
                    .iter()
                    .map(|s| (p - s).norm())
                    .fold(f64::INFINITY, f64::min);
                assert!(
                    own <= nearest + 1e-6,
                    "{edge:?} at {p:?}: own sites at {own}, nearest at {nearest}"
                );
            }
        }
    }

    /// Circumcenters of the Delaunay triangles.
    fn delaunay_circumcenters(sites: &[Point2]) -> Vec<Point2> {
        let mut triangulation: DelaunayTriangulation<spade::Point2<f64>> =
            DelaunayTriangulation::new();
        for p in sites {
            triangulation.insert(spade::Point2::new(p.x, p.y)).unwrap();
        }
        triangulation
            .inner_faces()
            .filter_map(|face| {
                let [a, b, c] = face.vertices().map(|v| {
                    let p = v.position();
                    Point2::new(p.x, p.y)
                });
                let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
                if d == 0.0 {
                    return None;
                }
                let a2 = a.coords.norm_squared();
                let b2 = b.coords.norm_squared();
                let c2 = c.coords.norm_squared();
                Some(Point2::new(
                    (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
                    (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
                ))
            })
            .collect()
    }

    #[test]
    fn two_sites_give_their_perpendicular_bisector() {
        init_tracing();
        let diagram = compute_voronoi(&pts(&[(0.0, 0.0), (10.0, 0.0)]), 20.0, 20.0).unwrap();
        assert!(diagram.vertices.is_empty());
        let segments: Vec<&VoronoiEdge> = diagram.segments().collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, Point2::new(5.0, 0.0));
        assert_eq!(segments[0].end, Point2::new(5.0, 20.0));
    }

    #[test]
    fn clockwise_triple_has_one_vertex_with_three_edges() {
        init_tracing();
        let diagram =
            compute_voronoi(&pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]), 20.0, 20.0).unwrap();
        assert_eq!(diagram.vertices, vec![Point2::new(5.0, 3.75)]);
        let vertex = diagram.vertices[0];
        assert_eq!(diagram.segments().filter(|e| e.touches(&vertex)).count(), 3);
        assert_eq!(diagram.segment_count(), 3);
    }

    #[test]
    fn site_below_a_level_breakpoint_closes_the_level_edge() {
        init_tracing();
        let sites = pts(&[(90.0, 0.0), (70.0, 0.0), (80.0, 30.0)]);
        let diagram = compute_voronoi(&sites, 100.0, 100.0).unwrap();
        assert_eq!(diagram.vertices.len(), 1);
        let vertex = diagram.vertices[0];
        assert!(abs_diff_eq!(vertex.x, 80.0, epsilon = 1e-9));
        assert!(abs_diff_eq!(vertex.y, 40.0 / 3.0, epsilon = 1e-9));

        let level = diagram
            .segments()
            .find(|e| e.left_site.y == e.right_site.y)
            .unwrap();
        assert_eq!(level.start, Point2::new(80.0, 0.0));
        assert_eq!(level.end, vertex);
        assert_eq!(diagram.segments().filter(|e| e.touches(&vertex)).count(), 3);
        assert_edges_separate_nearest_sites(&diagram, &sites);
    }

    #[test]
    fn zero_and_one_site_are_empty() {
        assert!(compute_voronoi(&[], 10.0, 10.0).unwrap().is_empty());
        let one = compute_voronoi(&pts(&[(1.0, 2.0)]), 10.0, 10.0).unwrap();
        assert!(one.is_empty());
        assert_eq!(one.stats.site_events, 1);
    }

    #[test]
    fn invalid_box_is_rejected_before_sites() {
        let err = compute_voronoi(&pts(&[(f64::NAN, 0.0)]), 0.0, 10.0).unwrap_err();
        assert!(matches!(
            err,
            VoronoiError::Input(InputError::InvalidBox { .. })
        ));
    }

    #[test]
    fn sites_outside_the_box_are_rejected() {
        let err = compute_voronoi(&pts(&[(5.0, 5.0), (5.0, 25.0)]), 10.0, 20.0).unwrap_err();
        assert!(matches!(
            err,
            VoronoiError::Input(InputError::SiteOutsideBox { index: 1 })
        ));
    }

    #[test]
    fn coincident_sites_are_rejected() {
        let err = compute_voronoi(&pts(&[(1.0, 1.0), (5.0, 5.0), (1.0, 1.0)]), 10.0, 10.0)
            .unwrap_err();
        assert!(matches!(
            err,
            VoronoiError::Input(InputError::CoincidentSites { .. })
        ));
    }

    #[test]
    fn separation_config_absorbs_near_duplicates() {
        let sites = pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (5.5, 10.5), (0.0, 0.0)]);
        let config = VoronoiConfig {
            min_site_separation: Some(3.0),
            ..VoronoiConfig::default()
        };
        let diagram = ComputeVoronoi::new(sites, 20.0, 20.0)
            .with_config(config)
            .execute()
            .unwrap();
        let reference =
            compute_voronoi(&pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]), 20.0, 20.0).unwrap();
        assert_eq!(diagram, reference);
    }

    #[test]
    fn endpoints_stay_inside_the_box() {
        init_tracing();
        for seed in 0..8 {
            let sites = random_sites(seed, 40, 100.0, 60.0);
            let diagram = compute_voronoi(&sites, 100.0, 60.0).unwrap();
            let bounds = BoundingBox::new(100.0, 60.0).unwrap();
            for edge in diagram.segments() {
                assert!(bounds.contains(&edge.start), "seed {seed}: {edge:?}");
                assert!(bounds.contains(&edge.end), "seed {seed}: {edge:?}");
            }
            assert!(diagram.vertices.iter().all(|v| bounds.contains(v)));
            let stats = diagram.stats;
            assert!(
                diagram.vertices.len() <= stats.circle_events_processed + stats.breakpoint_sites
            );
        }
    }

    #[test]
    fn recomputation_is_identical() {
        let sites = random_sites(7, 30, 50.0, 50.0);
        let first = compute_voronoi(&sites, 50.0, 50.0).unwrap();
        let second = compute_voronoi(&sites, 50.0, 50.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn input_order_does_not_matter() {
        let sites = random_sites(11, 30, 80.0, 80.0);
        let mut reversed = sites.clone();
        reversed.reverse();
        let mut rotated = sites.clone();
        rotated.rotate_left(13);

        let reference = compute_voronoi(&sites, 80.0, 80.0).unwrap();
        assert_eq!(compute_voronoi(&reversed, 80.0, 80.0).unwrap(), reference);
        assert_eq!(compute_voronoi(&rotated, 80.0, 80.0).unwrap(), reference);
    }

    #[test]
    fn vertices_match_delaunay_circumcenters() {
        init_tracing();
        let (width, height) = (100.0, 100.0);
        for seed in 20..26 {
            let sites = random_sites(seed, 50, width, height);
            let diagram = compute_voronoi(&sites, width, height).unwrap();
            let centers = delaunay_circumcenters(&sites);

            // Every vertex the sweep reports is a circumcenter of an empty circle.
            for v in &diagram.vertices {
                assert!(
                    centers.iter().any(|c| close(c, v)),
                    "seed {seed}: spurious vertex {v:?}"
                );
            }
            // Every circumcenter inside the box is found.
            let bounds = BoundingBox::new(width, height).unwrap();
            for c in &centers {
                if bounds.contains(c) {
                    assert!(
                        diagram.vertices.iter().any(|v| close(c, v)),
                        "seed {seed}: missing vertex {c:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn edges_separate_their_nearest_sites() {
        init_tracing();
        for seed in 40..48 {
            let sites = random_sites(seed, 25, 40.0, 40.0);
            let diagram = compute_voronoi(&sites, 40.0, 40.0).unwrap();
            assert_edges_separate_nearest_sites(&diagram, &sites);
        }
    }
}

pub mod sites;
pub mod voronoi;

pub use sites::{PrepareSites, DEFAULT_MIN_SITE_SEPARATION};
pub use voronoi::{
    compute_voronoi, ComputeVoronoi, FinishDiagram, VoronoiConfig, VoronoiDiagram, VoronoiEdge,
};

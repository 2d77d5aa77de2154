use thiserror::Error;

/// Top-level error type for Voronoi computations.
#[derive(Debug, Error)]
pub enum VoronoiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Sweep(#[from] SweepError),
}

/// Precondition violations detected before the sweep starts.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("box dimensions must be positive and finite, got {width} x {height}")]
    InvalidBox { width: f64, height: f64 },

    #[error("site {index} has a non-finite coordinate")]
    NonFiniteSite { index: usize },

    #[error("site {index} lies outside the box")]
    SiteOutsideBox { index: usize },

    #[error("sites {first} and {second} are coincident")]
    CoincidentSites { first: usize, second: usize },

    #[error("site separation must be non-negative and finite, got {0}")]
    InvalidSeparation(f64),
}

/// Internal inconsistencies of the sweep state.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),
}

/// Convenience type alias for results using [`VoronoiError`].
pub type Result<T> = std::result::Result<T, VoronoiError>;

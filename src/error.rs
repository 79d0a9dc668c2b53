//! Error types for grid construction

use thiserror::Error;

/// Rejected grid or world configuration.
///
/// Path search failures are not errors; they are reported through
/// [`crate::pathfinding::search::PathFailure`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cell radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("world extent must be positive on both axes, got ({0}, {1})")]
    DegenerateExtent(f64, f64),

    #[error("configuration contains a non-finite value")]
    NonFinite,

    #[error("extent ({0}, {1}) yields an empty grid for cell radius {2}")]
    EmptyGrid(f64, f64, f64),

    #[error("grid of {0} x {1} cells is too large")]
    TooLarge(f64, f64),

    #[error("terrain probe radius must be finite and non-negative, got {0}")]
    InvalidProbeRadius(f64),

    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

//! Error types
//!
//! Nothing in the simulation core is fatal. Vector and mass-bound problems are
//! recovered where they happen; these types exist so each recovery is an
//! explicit match rather than a silent fallback

use std::path::PathBuf;

use thiserror::Error;

/// Degenerate vector arithmetic
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    #[error("cannot rescale a zero-length vector")]
    ZeroLength,
}

/// Scenario validation and color parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("need at least 2 particles, got {0}")]
    PopulationTooSmall(usize),

    #[error("k must be at least 1")]
    ZeroNeighbors,

    #[error("expected exactly 2 designated particles, got {0}")]
    DesignatedCount(usize),

    #[error("mass bounds [{low}, {high}] must satisfy 0 < low <= high")]
    MassBounds { low: f64, high: f64 },

    #[error("mass {mass} lies outside its bounds [{low}, {high}]")]
    MassOutOfBounds { mass: f64, low: f64, high: f64 },

    #[error("distance clamp [{min}, {max}] must satisfy 0 < min <= max")]
    DistanceClamp { min: f64, max: f64 },

    #[error("{field} range [{low}, {high}] must be finite")]
    NonFiniteRange { field: &'static str, low: f64, high: f64 },

    #[error("mass drift must be finite and non-negative, got {0}")]
    MassDrift(f64),

    #[error("world size must be finite and positive, got {width} x {height}")]
    WorldSize { width: f64, height: f64 },

    #[error("export interval must be at least 1 frame")]
    ExportInterval,
}

/// Writing a rendered frame to disk
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Offline image tools (downsize, mosaic)
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("no tile images found in {0}")]
    NoTiles(PathBuf),

    #[error("invalid tool argument: {0}")]
    InvalidArgument(String),
}

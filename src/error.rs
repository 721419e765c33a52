use thiserror::Error;

use crate::math::Point2;
use crate::tessellation::Triangle;

/// Top-level error type for region triangulation and indexing.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Errors caused by malformed arguments.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("segments must have exactly 2 points, got {first} and {second}")]
    SegmentArity { first: usize, second: usize },

    #[error("ring has {0} points after normalization, at least 3 are required")]
    RingTooShort(usize),

    #[error("circle radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),

    #[error("circle origin must be finite, got ({x}, {y})")]
    NonFiniteOrigin { x: f64, y: f64 },
}

/// Errors raised by the ear-cutting engine.
#[derive(Debug, Error)]
pub enum TriangulationError {
    /// No ear could be found in the remaining ring. The polygon is unusable;
    /// the partial output is kept for diagnostics only.
    #[error(
        "ear cutting stalled after {} triangles with {} unresolved points",
        triangles.len(),
        unresolved.len()
    )]
    Stalled {
        triangles: Vec<Triangle>,
        unresolved: Vec<Point2>,
    },
}

/// Errors related to spatial index lookups.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("no shape named {0:?} in index")]
    NotFound(String),
}

/// Convenience type alias for results using [`RegionError`].
pub type Result<T> = std::result::Result<T, RegionError>;

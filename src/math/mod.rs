pub mod bbox;
pub mod distance_2d;
pub mod polygon_2d;
pub mod predicates;

pub use bbox::BoundingBox;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Relative tolerance for distance comparisons that cannot be made exactly.
pub const TOLERANCE: f64 = 1e-10;

//! Planar regions (polygons and circles) triangulated for fast point tests
//! and indexed for containment queries.

pub mod error;
pub mod index;
pub mod math;
pub mod shape;
pub mod tessellation;

pub use error::{RegionError, Result};
pub use index::{build_index, IndexConfig, IndexStrategy, ShapeIndex};
pub use shape::{Circle, Polygon, Shape};
pub use tessellation::{triangulate, EarCut, Triangle};

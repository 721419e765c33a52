mod batch;
mod ear_cut;

pub use batch::{BatchPolicy, BatchReport, Feature, FeatureFailure, TriangulateBatch};
pub use ear_cut::EarCut;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::polygon_2d::signed_area;
use crate::math::predicates::point_inside_triangle;
use crate::math::Point2;

/// A triangle produced by the ear cutter, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
}

impl Triangle {
    #[must_use]
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { a, b, c }
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices()).abs()
    }

    /// Boundary-inclusive point test.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        point_inside_triangle(p, &self.a, &self.b, &self.c)
    }

    #[must_use]
    pub fn vertices(&self) -> [Point2; 3] {
        [self.a, self.b, self.c]
    }
}

/// Triangulates a ring with the ear cutter.
///
/// Shorthand for `EarCut::new(ring).execute()`.
///
/// # Errors
///
/// See [`EarCut::execute`].
pub fn triangulate(ring: &[Point2]) -> Result<Vec<Triangle>> {
    EarCut::new(ring).execute()
}

use serde::{Deserialize, Serialize};

use super::Point2;

/// An axis-aligned bounding box in the plane.
///
/// Built from an empty point set, the box is inverted (`min = +inf`,
/// `max = -inf`): it contains nothing and every union with it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// The empty box.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Creates a box from its extents.
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Computes the tightest box around `points`.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        points.iter().fold(Self::EMPTY, |bb, p| bb.including(p))
    }

    /// Returns this box grown to include `p`.
    #[must_use]
    pub fn including(self, p: &Point2) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    /// Returns `true` if the box was built from no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        Point2::new(self.min_x, self.min_y)
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        Point2::new(self.max_x, self.max_y)
    }

    /// Boundary-inclusive point test.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Returns `true` if `other` lies entirely inside this box (touching allowed).
    #[must_use]
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        !other.is_empty()
            && other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Returns `true` if the boxes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Grows any zero-extent axis by `epsilon` on both sides so the box has
    /// positive area. Non-degenerate axes are left alone.
    #[must_use]
    pub fn expanded_if_degenerate(self, epsilon: f64) -> Self {
        let mut bb = self;
        if bb.width() <= 0.0 {
            bb.min_x -= epsilon;
            bb.max_x += epsilon;
        }
        if bb.height() <= 0.0 {
            bb.min_y -= epsilon;
            bb.max_y += epsilon;
        }
        bb
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

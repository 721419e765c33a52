mod circle;
pub mod containment;
mod polygon;

pub use circle::Circle;
pub use polygon::Polygon;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::math::{BoundingBox, Point2};

/// Free-form attributes carried over from the source feature.
pub type Properties = BTreeMap<String, String>;

/// A region that can be indexed and queried.
///
/// Serialized with an explicit `"kind"` tag, so a mixed collection can be
/// written and read back without any type registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
}

impl Shape {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Shape::Polygon(p) => p.id(),
            Shape::Circle(c) => c.id(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Shape::Polygon(p) => p.name(),
            Shape::Circle(c) => c.name(),
        }
    }

    /// Circles carry no description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Shape::Polygon(p) => Some(p.description()),
            Shape::Circle(_) => None,
        }
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        match self {
            Shape::Polygon(p) => p.properties(),
            Shape::Circle(c) => c.properties(),
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Polygon(p) => *p.bounding_box(),
            Shape::Circle(c) => c.bounding_box(),
        }
    }

    /// Exact, boundary-inclusive point test.
    #[must_use]
    pub fn point_inside(&self, p: &Point2) -> bool {
        match self {
            Shape::Polygon(poly) => poly.point_inside(p),
            Shape::Circle(c) => c.point_inside(p),
        }
    }

    /// Cheap bounding-box pre-filter for [`Shape::point_inside`].
    #[must_use]
    pub fn point_inside_bbox(&self, p: &Point2) -> bool {
        match self {
            Shape::Polygon(poly) => poly.point_inside_bbox(p),
            Shape::Circle(c) => c.point_inside_bbox(p),
        }
    }

    /// Returns `true` if `other` fits entirely inside `self`.
    #[must_use]
    pub fn shape_inside(&self, other: &Shape) -> bool {
        match (self, other) {
            (Shape::Polygon(outer), Shape::Polygon(inner)) => {
                containment::polygon_in_polygon(inner, outer)
            }
            (Shape::Polygon(outer), Shape::Circle(inner)) => {
                containment::circle_in_polygon(inner, outer)
            }
            (Shape::Circle(outer), Shape::Polygon(inner)) => {
                containment::polygon_in_circle(inner, outer)
            }
            (Shape::Circle(outer), Shape::Circle(inner)) => {
                containment::circle_in_circle(inner, outer)
            }
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

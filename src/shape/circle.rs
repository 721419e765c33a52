use serde::{Deserialize, Serialize};

use crate::error::{InputError, RegionError, Result};
use crate::math::distance_2d::distance;
use crate::math::{BoundingBox, Point2};

use super::Properties;

/// A disc given by its origin (center) and radius, in map units.
///
/// The origin is always finite and the radius finite and non-negative, on
/// construction and on deserialization alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircleRecord")]
pub struct Circle {
    id: String,
    name: String,
    origin: Point2,
    radius: f64,
    properties: Properties,
}

/// Unchecked wire form of [`Circle`].
#[derive(Deserialize)]
struct CircleRecord {
    id: String,
    name: String,
    origin: Point2,
    radius: f64,
    properties: Properties,
}

impl TryFrom<CircleRecord> for Circle {
    type Error = RegionError;

    fn try_from(record: CircleRecord) -> Result<Self> {
        Ok(Self::new(record.name, record.origin, record.radius)?
            .with_id(record.id)
            .with_properties(record.properties))
    }
}

impl Circle {
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteOrigin` if a coordinate of `origin` is
    /// NaN or infinite, and `InputError::InvalidRadius` if `radius` is
    /// negative, NaN or infinite.
    pub fn new(name: impl Into<String>, origin: Point2, radius: f64) -> Result<Self> {
        if !(origin.x.is_finite() && origin.y.is_finite()) {
            return Err(InputError::NonFiniteOrigin {
                x: origin.x,
                y: origin.y,
            }
            .into());
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(InputError::InvalidRadius(radius).into());
        }
        Ok(Self {
            id: String::new(),
            name: name.into(),
            origin,
            radius,
            properties: Properties::new(),
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Sets a property, returning the previous value if there was one.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    /// The square circumscribing the circle.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            self.origin.x - self.radius,
            self.origin.y - self.radius,
            self.origin.x + self.radius,
            self.origin.y + self.radius,
        )
    }

    /// Boundary-inclusive: points at exactly `radius` are inside.
    #[must_use]
    pub fn point_inside(&self, p: &Point2) -> bool {
        distance(&self.origin, p) <= self.radius
    }

    /// Cheap pre-filter against the circumscribing square.
    #[must_use]
    pub fn point_inside_bbox(&self, p: &Point2) -> bool {
        self.bounding_box().contains_point(p)
    }
}

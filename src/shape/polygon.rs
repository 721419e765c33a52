use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::polygon_2d::normalize_ring;
use crate::math::{BoundingBox, Point2};
use crate::tessellation::{EarCut, Triangle};

use super::Properties;

/// A triangulated planar region.
///
/// `alpha_shape` holds the normalized boundary ring (counter-clockwise, no
/// closing point, no colinear vertices); `triangles` partition its interior
/// and back [`Polygon::point_inside`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    id: String,
    name: String,
    description: String,
    alpha_shape: Vec<Point2>,
    triangles: Vec<Triangle>,
    bbox: BoundingBox,
    properties: Properties,
}

impl Polygon {
    /// Normalizes and triangulates `ring` into a new polygon.
    ///
    /// # Errors
    ///
    /// Returns an error if the ring cannot be triangulated
    /// (see [`EarCut::execute`]).
    pub fn new(name: impl Into<String>, ring: &[Point2]) -> Result<Self> {
        let alpha_shape = normalize_ring(ring);
        let triangles = EarCut::new(&alpha_shape)
            .with_normalized_input()
            .execute()?;
        Ok(Self::from_parts(name, alpha_shape, triangles))
    }

    /// Assembles a polygon from an already triangulated ring, as restored
    /// from storage. The bounding box is recomputed from `alpha_shape`.
    #[must_use]
    pub fn from_parts(
        name: impl Into<String>,
        alpha_shape: Vec<Point2>,
        triangles: Vec<Triangle>,
    ) -> Self {
        let bbox = BoundingBox::from_points(&alpha_shape);
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            alpha_shape,
            triangles,
            bbox,
            properties: Properties::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
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
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The normalized boundary ring.
    #[must_use]
    pub fn alpha_shape(&self) -> &[Point2] {
        &self.alpha_shape
    }

    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[must_use]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
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

    /// Boundary-inclusive containment test against the triangulation.
    #[must_use]
    pub fn point_inside(&self, p: &Point2) -> bool {
        self.triangles.iter().any(|t| t.contains(p))
    }

    /// Cheap pre-filter: is `p` inside the bounding box?
    #[must_use]
    pub fn point_inside_bbox(&self, p: &Point2) -> bool {
        self.bbox.contains_point(p)
    }

    /// Iterates over the boundary edges, closing the ring.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2, &Point2)> + '_ {
        let n = self.alpha_shape.len();
        (0..n).map(move |i| (&self.alpha_shape[i], &self.alpha_shape[(i + 1) % n]))
    }
}

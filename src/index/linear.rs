use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{IndexError, Result};
use crate::math::Point2;
use crate::shape::Shape;

use super::ShapeIndex;

/// Index that scans every shape on each query.
#[derive(Debug, Default)]
pub struct LinearIndex {
    shapes: RwLock<Vec<Arc<Shape>>>,
}

impl LinearIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Shape>>> {
        self.shapes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Shape>>> {
        self.shapes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ShapeIndex for LinearIndex {
    fn add_shape(&self, shape: Arc<Shape>) {
        self.write().push(shape);
    }

    fn add_shapes(&self, shapes: Vec<Arc<Shape>>) {
        self.write().extend(shapes);
    }

    fn shape_by_name(&self, name: &str) -> Result<Arc<Shape>> {
        self.read()
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| IndexError::NotFound(name.to_owned()).into())
    }

    fn remove_shape_by_name(&self, name: &str) -> Result<Arc<Shape>> {
        let mut shapes = self.write();
        let pos = shapes
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| IndexError::NotFound(name.to_owned()))?;
        debug!(name, "shape removed from linear index");
        Ok(shapes.remove(pos))
    }

    fn shapes_containing_point(&self, point: &Point2) -> Vec<Arc<Shape>> {
        self.read()
            .iter()
            .filter(|s| s.point_inside_bbox(point) && s.point_inside(point))
            .cloned()
            .collect()
    }

    fn shapes_containing_shape(&self, query: &Shape) -> Vec<Arc<Shape>> {
        let query_bbox = query.bounding_box();
        self.read()
            .iter()
            .filter(|s| s.bounding_box().intersects(&query_bbox) && s.shape_inside(query))
            .cloned()
            .collect()
    }

    fn shapes(&self) -> Vec<Arc<Shape>> {
        self.read().clone()
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

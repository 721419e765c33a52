use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rstar::{RStarInsertionStrategy, RTree, RTreeObject, RTreeParams, AABB};
use tracing::debug;

use crate::error::{IndexError, Result};
use crate::math::{BoundingBox, Point2};
use crate::shape::Shape;

use super::ShapeIndex;

/// Padding applied to zero-width or zero-height boxes before they enter the
/// tree, which needs rectangles of positive area.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Default node fan-out: 25 to 50 entries per node.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionTreeParams;

impl RTreeParams for RegionTreeParams {
    const MIN_SIZE: usize = 25;
    const MAX_SIZE: usize = 50;
    const REINSERTION_COUNT: usize = 10;
    type DefaultInsertionStrategy = RStarInsertionStrategy;
}

fn envelope_of(bbox: BoundingBox) -> AABB<[f64; 2]> {
    let bb = bbox.expanded_if_degenerate(DEGENERATE_EPSILON);
    AABB::from_corners([bb.min_x, bb.min_y], [bb.max_x, bb.max_y])
}

/// A shape stored in the tree together with its envelope.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    shape: Arc<Shape>,
    envelope: AABB<[f64; 2]>,
}

impl IndexEntry {
    fn new(shape: Arc<Shape>) -> Self {
        let envelope = envelope_of(shape.bounding_box());
        Self { shape, envelope }
    }
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Entries are the same when they hold the same shape allocation.
impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shape, &other.shape)
    }
}

/// Index backed by an R*-tree over shape bounding boxes.
///
/// Queries first collect the entries whose envelope meets the query
/// rectangle, then run the exact containment test on those only.
#[derive(Debug)]
pub struct TreeIndex<P = RegionTreeParams>
where
    P: RTreeParams,
{
    tree: RwLock<RTree<IndexEntry, P>>,
}

impl TreeIndex<RegionTreeParams> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_params()
    }
}

impl Default for TreeIndex<RegionTreeParams> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RTreeParams> TreeIndex<P> {
    /// Creates an empty tree with custom fan-out parameters.
    #[must_use]
    pub fn with_params() -> Self {
        Self {
            tree: RwLock::new(RTree::new_with_params()),
        }
    }

    /// Bulk-loads a balanced tree from `shapes`.
    #[must_use]
    pub fn bulk_load(shapes: Vec<Arc<Shape>>) -> Self {
        let entries = shapes.into_iter().map(IndexEntry::new).collect();
        Self {
            tree: RwLock::new(RTree::bulk_load_with_params(entries)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RTree<IndexEntry, P>> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RTree<IndexEntry, P>> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P> ShapeIndex for TreeIndex<P>
where
    P: RTreeParams + Send + Sync + std::fmt::Debug,
{
    fn add_shape(&self, shape: Arc<Shape>) {
        self.write().insert(IndexEntry::new(shape));
    }

    fn add_shapes(&self, shapes: Vec<Arc<Shape>>) {
        let mut tree = self.write();
        for shape in shapes {
            tree.insert(IndexEntry::new(shape));
        }
    }

    fn shape_by_name(&self, name: &str) -> Result<Arc<Shape>> {
        self.read()
            .iter()
            .find(|e| e.shape.name() == name)
            .map(|e| Arc::clone(&e.shape))
            .ok_or_else(|| IndexError::NotFound(name.to_owned()).into())
    }

    fn remove_shape_by_name(&self, name: &str) -> Result<Arc<Shape>> {
        let mut tree = self.write();
        let entry = tree
            .iter()
            .find(|e| e.shape.name() == name)
            .cloned()
            .ok_or_else(|| IndexError::NotFound(name.to_owned()))?;
        let removed = tree
            .remove(&entry)
            .ok_or_else(|| IndexError::NotFound(name.to_owned()))?;
        debug!(name, remaining = tree.size(), "shape removed from tree index");
        Ok(removed.shape)
    }

    fn shapes_containing_point(&self, point: &Point2) -> Vec<Arc<Shape>> {
        let query = AABB::from_point([point.x, point.y]);
        self.read()
            .locate_in_envelope_intersecting(&query)
            .filter(|e| e.shape.point_inside_bbox(point) && e.shape.point_inside(point))
            .map(|e| Arc::clone(&e.shape))
            .collect()
    }

    fn shapes_containing_shape(&self, query: &Shape) -> Vec<Arc<Shape>> {
        let rect = envelope_of(query.bounding_box());
        self.read()
            .locate_in_envelope_intersecting(&rect)
            .filter(|e| e.shape.shape_inside(query))
            .map(|e| Arc::clone(&e.shape))
            .collect()
    }

    fn shapes(&self) -> Vec<Arc<Shape>> {
        self.read().iter().map(|e| Arc::clone(&e.shape)).collect()
    }

    fn len(&self) -> usize {
        self.read().size()
    }
}

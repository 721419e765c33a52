use std::borrow::Cow;

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, warn};

use crate::error::{InputError, Result, TriangulationError};
use crate::math::polygon_2d::normalize_ring;
use crate::math::predicates::{determinant, is_convex, point_inside_triangle};
use crate::math::Point2;

use super::Triangle;

new_key_type! {
    /// Key of a vertex node in the ring arena.
    struct NodeId;
}

#[derive(Debug, Clone, Copy)]
struct Node {
    point: Point2,
    prev: NodeId,
    next: NodeId,
}

/// Circular doubly-linked vertex ring.
///
/// Nodes live in an arena and refer to their neighbours by key, so cutting
/// an ear is a relink of two keys.
#[derive(Debug)]
struct Ring {
    nodes: SlotMap<NodeId, Node>,
}

impl Ring {
    /// Builds the ring and returns it with the key of its first node.
    /// `points` must not be empty.
    fn from_points(points: &[Point2]) -> (Self, NodeId) {
        let mut nodes = SlotMap::with_capacity_and_key(points.len());
        let ids: Vec<NodeId> = points
            .iter()
            .map(|&point| {
                nodes.insert(Node {
                    point,
                    prev: NodeId::default(),
                    next: NodeId::default(),
                })
            })
            .collect();

        let n = ids.len();
        for (i, &id) in ids.iter().enumerate() {
            let node = &mut nodes[id];
            node.prev = ids[(i + n - 1) % n];
            node.next = ids[(i + 1) % n];
        }

        (Self { nodes }, ids[0])
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Node {
        self.nodes[id]
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(Node { prev, next, .. }) = self.nodes.remove(id) {
            self.nodes[prev].next = next;
            self.nodes[next].prev = prev;
        }
    }

    /// Returns `true` if any node other than the triple lies inside or on
    /// triangle `prev, cur, next`. Nodes coinciding with a corner are ignored.
    fn any_inside(&self, prev: NodeId, cur: NodeId, next: NodeId) -> bool {
        let a = self.nodes[prev].point;
        let b = self.nodes[cur].point;
        let c = self.nodes[next].point;
        self.nodes.iter().any(|(id, node)| {
            id != prev
                && id != cur
                && id != next
                && node.point != a
                && node.point != b
                && node.point != c
                && point_inside_triangle(&node.point, &a, &b, &c)
        })
    }

    /// Collects the points of the ring starting at `start`.
    fn points_from(&self, start: NodeId) -> Vec<Point2> {
        let mut points = Vec::with_capacity(self.len());
        let mut id = start;
        for _ in 0..self.len() {
            let node = self.nodes[id];
            points.push(node.point);
            id = node.next;
        }
        points
    }
}

/// Triangulates a simple polygon ring by ear cutting.
///
/// The ring is normalized first (see [`normalize_ring`]), so it may be given
/// in either winding, with or without a closing point. Runs in `O(n²)`.
pub struct EarCut<'a> {
    ring: &'a [Point2],
    normalized: bool,
}

impl<'a> EarCut<'a> {
    /// Creates a new `EarCut` operation.
    #[must_use]
    pub fn new(ring: &'a [Point2]) -> Self {
        Self {
            ring,
            normalized: false,
        }
    }

    /// Skips normalization; `ring` must already be the output of
    /// [`normalize_ring`].
    #[must_use]
    pub fn with_normalized_input(mut self) -> Self {
        self.normalized = true;
        self
    }

    /// Executes the triangulation.
    ///
    /// A simple ring of `n` normalized vertices yields `n - 2` triangles.
    /// Zero-area ears are cut without emitting a triangle, so the count can
    /// be lower.
    ///
    /// # Errors
    ///
    /// Returns `InputError::RingTooShort` if fewer than 3 points remain after
    /// normalization, and `TriangulationError::Stalled` if no ear can be
    /// found in what is left of the ring (typically a self-intersecting
    /// input).
    #[allow(clippy::float_cmp)]
    pub fn execute(&self) -> Result<Vec<Triangle>> {
        let points = if self.normalized {
            Cow::Borrowed(self.ring)
        } else {
            Cow::Owned(normalize_ring(self.ring))
        };
        if points.len() < 3 {
            return Err(InputError::RingTooShort(points.len()).into());
        }
        if let &[a, b, c] = &*points {
            return Ok(vec![Triangle::new(a, b, c)]);
        }

        let (mut ring, start) = Ring::from_points(&points);
        let mut triangles = Vec::with_capacity(points.len() - 2);
        let mut cur = start;
        let mut stop = start;

        while ring.len() > 2 {
            let Node { point, prev, next } = ring.node(cur);
            let a = ring.node(prev).point;
            let c = ring.node(next).point;
            let det = determinant(&a, &point, &c);

            let convex = is_convex(&a, &point, &c);
            let is_ear = det == 0.0 || (convex && !ring.any_inside(prev, cur, next));
            if is_ear {
                if convex {
                    triangles.push(Triangle::new(a, point, c));
                }
                ring.unlink(cur);
                stop = prev;
                cur = prev;
                continue;
            }

            cur = next;
            if cur == stop {
                let unresolved = ring.points_from(stop);
                warn!(
                    vertices = points.len(),
                    triangles = triangles.len(),
                    unresolved = unresolved.len(),
                    "ear cutting stalled"
                );
                return Err(TriangulationError::Stalled {
                    triangles,
                    unresolved,
                }
                .into());
            }
        }

        debug!(
            vertices = points.len(),
            triangles = triangles.len(),
            "ear cutting finished"
        );
        Ok(triangles)
    }
}

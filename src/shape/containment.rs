//! Exact shape-in-shape tests for every pair of shape kinds.

use crate::math::distance_2d::{distance, point_to_segment_dist};

use super::{Circle, Polygon};

/// Returns `true` if every vertex of `inner` lies inside-or-on `outer`.
///
/// Only the ring vertices are tested; an edge of `inner` may still leave a
/// concave `outer` between two covered vertices.
#[must_use]
pub fn polygon_in_polygon(inner: &Polygon, outer: &Polygon) -> bool {
    let outer_bbox = outer.bounding_box();
    !inner.alpha_shape().is_empty()
        && inner
            .alpha_shape()
            .iter()
            .all(|v| outer_bbox.contains_point(v) && outer.point_inside(v))
}

/// Returns `true` if the whole disc of `circle` lies inside `polygon`.
///
/// The disc must keep at least `radius` away from every edge, and its origin
/// must be inside the ring (odd number of crossings of a rightward ray).
#[must_use]
pub fn circle_in_polygon(circle: &Circle, polygon: &Polygon) -> bool {
    let origin = circle.origin();
    let radius = circle.radius();
    let bbox = polygon.bounding_box();

    if !bbox.contains_point(origin)
        || distance(origin, &bbox.min()) <= radius
        || distance(origin, &bbox.max()) <= radius
    {
        return false;
    }

    let ray_end_x = bbox.max_x + 1.0;
    let mut crossings = 0_usize;
    for (a, b) in polygon.edges() {
        if point_to_segment_dist(origin, a, b) < radius {
            return false;
        }
        // Half-open rule: a vertex on the ray is counted for one edge only.
        if (a.y > origin.y) != (b.y > origin.y) {
            let x = a.x + (origin.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x > origin.x && x <= ray_end_x {
                crossings += 1;
            }
        }
    }

    crossings % 2 == 1
}

/// Returns `true` if every vertex of `polygon` lies within `circle`.
#[must_use]
pub fn polygon_in_circle(polygon: &Polygon, circle: &Circle) -> bool {
    circle.bounding_box().contains_box(polygon.bounding_box())
        && polygon.alpha_shape().iter().all(|v| circle.point_inside(v))
}

/// Returns `true` if `inner` lies within `outer`; a circle contains itself.
#[must_use]
pub fn circle_in_circle(inner: &Circle, outer: &Circle) -> bool {
    distance(outer.origin(), inner.origin()) + inner.radius() <= outer.radius()
}

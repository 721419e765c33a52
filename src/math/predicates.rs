use crate::error::{InputError, Result};

use super::{BoundingBox, Point2};

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    CounterClockwise,
    Clockwise,
}

/// Signed turn of `a -> b -> c`: twice the signed area of the triangle.
///
/// Positive for a left (counter-clockwise) turn, negative for a right turn,
/// exactly zero when the points are colinear.
#[must_use]
pub fn determinant(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - b.y) - (c.x - b.x) * (b.y - a.y)
}

/// Returns `true` if `b` is a strictly convex vertex of a counter-clockwise ring.
#[must_use]
pub fn is_convex(a: &Point2, b: &Point2, c: &Point2) -> bool {
    determinant(a, b, c) > 0.0
}

/// Classifies the turn of `p1 -> p2 -> p3`.
#[must_use]
pub fn orientation(p1: &Point2, p2: &Point2, p3: &Point2) -> Orientation {
    let det = determinant(p1, p2, p3);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Colinear
    }
}

/// Tests whether `p` lies inside or on the boundary of triangle `abc`.
///
/// Works for either winding. Vertices and edge points test `true`.
#[must_use]
pub fn point_inside_triangle(p: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    let d1 = determinant(p, a, b);
    let d2 = determinant(p, b, c);
    let d3 = determinant(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Returns `true` if `q` lies within the bounding box of segment `pr`.
/// Only meaningful when the three points are already known to be colinear.
fn on_segment(p: &Point2, q: &Point2, r: &Point2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Tests whether two closed segments share at least one point.
///
/// Each segment is given as a slice of exactly two points.
///
/// # Errors
///
/// Returns `InputError::SegmentArity` if either slice does not hold exactly
/// two points.
pub fn segments_intersect(seg1: &[Point2], seg2: &[Point2]) -> Result<bool> {
    let (&[p1, q1], &[p2, q2]) = (seg1, seg2) else {
        return Err(InputError::SegmentArity {
            first: seg1.len(),
            second: seg2.len(),
        }
        .into());
    };

    if !BoundingBox::from_points(seg1).intersects(&BoundingBox::from_points(seg2)) {
        return Ok(false);
    }

    let o1 = orientation(&p1, &q1, &p2);
    let o2 = orientation(&p1, &q1, &q2);
    let o3 = orientation(&p2, &q2, &p1);
    let o4 = orientation(&p2, &q2, &q1);

    if o1 != o2 && o3 != o4 {
        return Ok(true);
    }

    let touching = (o1 == Orientation::Colinear && on_segment(&p1, &p2, &q1))
        || (o2 == Orientation::Colinear && on_segment(&p1, &q2, &q1))
        || (o3 == Orientation::Colinear && on_segment(&p2, &p1, &q2))
        || (o4 == Orientation::Colinear && on_segment(&p2, &q1, &q2));

    Ok(touching)
}

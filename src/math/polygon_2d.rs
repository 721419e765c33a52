use super::distance_2d::distance;
use super::predicates::determinant;
use super::{Point2, TOLERANCE};

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the ring winds clockwise. Rings under 3 points are never clockwise.
#[must_use]
pub fn is_clockwise(points: &[Point2]) -> bool {
    signed_area(points) < 0.0
}

/// Unsigned area enclosed by the ring.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Brings a ring into the canonical form expected by the ear cutter.
///
/// Drops a repeated closing point, reorders the ring counter-clockwise and
/// removes every vertex lying on the straight segment between its neighbours
/// (consecutive duplicates included). Rings under 3 points are returned as is.
/// The result may have fewer than 3 points if the ring was degenerate.
///
/// Applying the function twice gives the same result as applying it once.
#[must_use]
pub fn normalize_ring(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut ring = points.to_vec();
    while ring.len() > 1 && ring.last() == ring.first() {
        ring.pop();
    }

    if is_clockwise(&ring) {
        ring.reverse();
    }

    'scan: while ring.len() >= 3 {
        let n = ring.len();
        for i in 0..n {
            let prev = &ring[(i + n - 1) % n];
            let cur = &ring[i];
            let next = &ring[(i + 1) % n];
            if lies_between(prev, cur, next) {
                ring.remove(i);
                continue 'scan;
            }
        }
        break;
    }

    ring
}

/// `cur` sits on the segment `prev`-`next`: zero turn and the two partial
/// lengths add up to the full length.
#[allow(clippy::float_cmp)]
fn lies_between(prev: &Point2, cur: &Point2, next: &Point2) -> bool {
    if determinant(prev, cur, next) != 0.0 {
        return false;
    }
    let full = distance(prev, next);
    let detour = distance(prev, cur) + distance(cur, next);
    (detour - full).abs() <= TOLERANCE * full.max(1.0)
}

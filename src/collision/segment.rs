//! Line segment predicates and an even-odd point test for arbitrary outlines.

use crate::error::PhysicsError;
use crate::math::{Vector2, EPSILON};
use crate::Result;

/// Turn direction of an ordered triple of points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the triple `(p, q, r)`
pub fn orientation(p: Vector2, q: Vector2, r: Vector2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);

    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Returns true if `q` lies within the bounding box of the segment `p..r`
pub fn on_segment(p: Vector2, q: Vector2, r: Vector2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Returns true if segment `p1..p2` touches or crosses segment `q1..q2`
pub fn segments_intersect(p1: Vector2, p2: Vector2, q1: Vector2, q2: Vector2) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    (o1 != o2 && o3 != o4)
        || (o1 == Orientation::Collinear && on_segment(p1, q1, p2))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, p2))
        || (o3 == Orientation::Collinear && on_segment(q1, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(q1, p2, q2))
}

/// Crossing point of two segments.
///
/// Parallel (including collinear) and non-crossing segments give `None`.
/// A computed point outside either segment's bounds is an
/// `InvariantViolation`.
pub fn segment_intersection(
    p1: Vector2,
    p2: Vector2,
    q1: Vector2,
    q2: Vector2,
) -> Result<Option<Vector2>> {
    let d1 = p2 - p1;
    let d2 = q2 - q1;
    let denominator = d1.cross(&d2);

    if denominator.abs() < EPSILON {
        return Ok(None);
    }

    let delta = q1 - p1;
    let t = delta.cross(&d2) / denominator;
    let u = delta.cross(&d1) / denominator;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return Ok(None);
    }

    let point = p1 + d1 * t;
    check_within_segments(point, p1, p2, q1, q2)?;

    Ok(Some(point))
}

fn check_within_segments(
    point: Vector2,
    p1: Vector2,
    p2: Vector2,
    q1: Vector2,
    q2: Vector2,
) -> Result<()> {
    let scale = [p1, p2, q1, q2]
        .iter()
        .fold(1.0f32, |acc, v| acc.max(v.x.abs()).max(v.y.abs()));
    let tolerance = scale * 1.0e-4;

    let within = |a: Vector2, b: Vector2| {
        point.x >= a.x.min(b.x) - tolerance
            && point.x <= a.x.max(b.x) + tolerance
            && point.y >= a.y.min(b.y) - tolerance
            && point.y <= a.y.max(b.y) + tolerance
    };

    if within(p1, p2) && within(q1, q2) {
        Ok(())
    } else {
        Err(PhysicsError::InvariantViolation(format!(
            "intersection {} lies outside segments {}..{} and {}..{}",
            point, p1, p2, q1, q2
        )))
    }
}

/// Even-odd ray cast; works for concave outlines too
pub fn point_in_polygon_crossing(point: Vector2, vertices: &[Vector2]) -> bool {
    let len = vertices.len();
    if len < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = len - 1;

    for i in 0..len {
        let vi = vertices[i];
        let vj = vertices[j];

        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}

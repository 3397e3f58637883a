//! Separating-axis and Voronoi-region tests between circles and convex polygons.
//!
//! Every detailed test returns `None` as soon as a separating axis (or a
//! vertex farther than the circle's radius) is found. When the shapes do
//! overlap the returned `CollisionDetails` carries the axis of least
//! penetration, pointing from the first argument toward the second.
//! Temporaries are plain `Vector2` values, so no state survives a call.

use crate::collision::{CollisionDetails, Containment};
use crate::math::Vector2;
use crate::shapes::{Circle, Polygon, Shape, ShapeKind};

/// Position of a point relative to an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VoronoiRegion {
    /// Before the edge's start vertex
    Left,
    /// Alongside the edge
    Middle,
    /// Past the edge's end vertex
    Right,
}

// Tiny counter-clockwise square used to test point containment in polygons
const PROBE_SIZE: f32 = 1.0e-6;

const PROBE_POINTS: [Vector2; 4] = [
    Vector2 { x: 0.0, y: 0.0 },
    Vector2 { x: PROBE_SIZE, y: 0.0 },
    Vector2 { x: PROBE_SIZE, y: PROBE_SIZE },
    Vector2 { x: 0.0, y: PROBE_SIZE },
];

const PROBE_NORMALS: [Vector2; 4] = [
    Vector2 { x: 0.0, y: -1.0 },
    Vector2 { x: 1.0, y: 0.0 },
    Vector2 { x: 0.0, y: 1.0 },
    Vector2 { x: -1.0, y: 0.0 },
];

/// Classifies `point` (relative to the start of `line`) against the edge
fn voronoi_region(line: Vector2, point: Vector2) -> VoronoiRegion {
    let len2 = line.length_squared();
    let dp = point.dot(&line);

    if dp < 0.0 {
        VoronoiRegion::Left
    } else if dp > len2 {
        VoronoiRegion::Right
    } else {
        VoronoiRegion::Middle
    }
}

/// Projects every point onto `normal` and returns the `(min, max)` range
fn flatten_points_on(points: &[Vector2], normal: Vector2) -> (f32, f32) {
    points.iter().fold((f32::MAX, -f32::MAX), |(min, max), point| {
        let dot = point.dot(&normal);
        (min.min(dot), max.max(dot))
    })
}

/// Returns true if `axis` separates the two point sets.
///
/// Otherwise records the overlap along `axis` in `details` when it is
/// smaller than the best seen so far, and clears containment flags the
/// ranges contradict.
fn is_separating_axis(
    a_pos: Vector2,
    b_pos: Vector2,
    a_points: &[Vector2],
    b_points: &[Vector2],
    axis: Vector2,
    details: &mut CollisionDetails,
) -> bool {
    let projected_offset = (b_pos - a_pos).dot(&axis);

    let (a_min, a_max) = flatten_points_on(a_points, axis);
    let (b_min, b_max) = flatten_points_on(b_points, axis);
    let b_min = b_min + projected_offset;
    let b_max = b_max + projected_offset;

    if a_min > b_max || b_min > a_max {
        return true;
    }

    let overlap = if a_min < b_min {
        details.containment.remove(Containment::A_IN_B);

        if a_max < b_max {
            details.containment.remove(Containment::B_IN_A);
            a_max - b_min
        } else {
            let option1 = a_max - b_min;
            let option2 = b_max - a_min;
            if option1 < option2 { option1 } else { -option2 }
        }
    } else {
        details.containment.remove(Containment::B_IN_A);

        if a_max > b_max {
            details.containment.remove(Containment::A_IN_B);
            a_min - b_max
        } else {
            let option1 = a_max - b_min;
            let option2 = b_max - a_min;
            if option1 < option2 { option1 } else { -option2 }
        }
    };

    let abs_overlap = overlap.abs();
    if abs_overlap < details.overlap {
        details.overlap = abs_overlap;
        details.overlap_unit = if overlap < 0.0 { axis.reverse() } else { axis };
    }

    false
}

// SAT over raw point and normal sets, shared by polygon tests and point probes
fn separating_axis_test(
    a_pos: Vector2,
    a_points: &[Vector2],
    a_normals: &[Vector2],
    b_pos: Vector2,
    b_points: &[Vector2],
    b_normals: &[Vector2],
) -> Option<CollisionDetails> {
    if a_points.is_empty() || b_points.is_empty() {
        return None;
    }

    let mut details = CollisionDetails::new(ShapeKind::Polygon, ShapeKind::Polygon);

    for normal in a_normals.iter().chain(b_normals.iter()) {
        if is_separating_axis(a_pos, b_pos, a_points, b_points, *normal, &mut details) {
            return None;
        }
    }

    details.finish();
    Some(details)
}

/// Tests two circles for overlap
pub fn test_circle_circle(
    a: &Circle,
    a_pos: Vector2,
    b: &Circle,
    b_pos: Vector2,
) -> Option<CollisionDetails> {
    let difference = b.center(b_pos) - a.center(a_pos);

    let total_radius = a.get_radius() + b.get_radius();
    let distance_sq = difference.length_squared();

    if distance_sq > total_radius * total_radius {
        return None;
    }

    let dist = distance_sq.sqrt();
    let (ra, rb) = (a.get_radius(), b.get_radius());

    let mut details = CollisionDetails::new(ShapeKind::Circle, ShapeKind::Circle);
    details.overlap = total_radius - dist;
    details.overlap_unit = difference.normalize();
    details.containment.set(Containment::A_IN_B, ra <= rb && dist <= rb - ra);
    details.containment.set(Containment::B_IN_A, rb <= ra && dist <= ra - rb);
    details.finish();

    Some(details)
}

/// Tests two convex polygons for overlap using the separating axis theorem
pub fn test_polygon_polygon(
    a: &Polygon,
    a_pos: Vector2,
    b: &Polygon,
    b_pos: Vector2,
) -> Option<CollisionDetails> {
    separating_axis_test(
        a_pos,
        a.get_calc_points(),
        a.get_normals(),
        b_pos,
        b.get_calc_points(),
        b.get_normals(),
    )
}

/// Tests a convex polygon against a circle using the Voronoi regions of each edge
pub fn test_polygon_circle(
    polygon: &Polygon,
    polygon_pos: Vector2,
    circle: &Circle,
    circle_pos: Vector2,
) -> Option<CollisionDetails> {
    let points = polygon.get_calc_points();
    let edges = polygon.get_edges();
    let len = points.len();

    if len == 0 {
        return None;
    }

    // Circle centre relative to the polygon's position
    let center = circle.center(circle_pos) - polygon_pos;
    let radius = circle.get_radius();
    let radius2 = radius * radius;

    let mut details = CollisionDetails::new(ShapeKind::Polygon, ShapeKind::Circle);

    for i in 0..len {
        let next = if i == len - 1 { 0 } else { i + 1 };
        let prev = if i == 0 { len - 1 } else { i - 1 };

        let mut overlap = 0.0;
        let mut overlap_unit = None;

        let edge = edges[i];
        let point = center - points[i];

        if point.length_squared() > radius2 {
            details.containment.remove(Containment::A_IN_B);
        }

        match voronoi_region(edge, point) {
            VoronoiRegion::Left => {
                let prev_point = center - points[prev];

                if voronoi_region(edges[prev], prev_point) == VoronoiRegion::Right {
                    let dist = point.length();
                    if dist > radius {
                        return None;
                    }

                    details.containment.remove(Containment::B_IN_A);
                    overlap_unit = Some(point.normalize());
                    overlap = radius - dist;
                }
            }
            VoronoiRegion::Right => {
                let next_point = center - points[next];

                if voronoi_region(edges[next], next_point) == VoronoiRegion::Left {
                    let dist = next_point.length();
                    if dist > radius {
                        return None;
                    }

                    details.containment.remove(Containment::B_IN_A);
                    overlap_unit = Some(next_point.normalize());
                    overlap = radius - dist;
                }
            }
            VoronoiRegion::Middle => {
                let normal = edge.perp().normalize();
                let dist = point.dot(&normal);

                if dist > 0.0 && dist.abs() > radius {
                    return None;
                }

                overlap_unit = Some(normal);
                overlap = radius - dist;

                if dist >= 0.0 || overlap < 2.0 * radius {
                    details.containment.remove(Containment::B_IN_A);
                }
            }
        }

        if let Some(unit) = overlap_unit {
            if overlap.abs() < details.overlap.abs() {
                details.overlap = overlap;
                details.overlap_unit = unit;
            }
        }
    }

    details.finish();
    Some(details)
}

/// Tests a circle against a convex polygon.
///
/// The result is oriented from the circle toward the polygon.
pub fn test_circle_polygon(
    circle: &Circle,
    circle_pos: Vector2,
    polygon: &Polygon,
    polygon_pos: Vector2,
) -> Option<CollisionDetails> {
    test_polygon_circle(polygon, polygon_pos, circle, circle_pos).map(CollisionDetails::swapped)
}

/// Dispatches to the right pairwise test for two shapes
pub fn test_shapes(
    a: &Shape,
    a_pos: Vector2,
    b: &Shape,
    b_pos: Vector2,
) -> Option<CollisionDetails> {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => test_circle_circle(a, a_pos, b, b_pos),
        (Shape::Circle(circle), other) => other
            .as_polygon()
            .and_then(|polygon| test_circle_polygon(circle, a_pos, polygon, b_pos)),
        (other, Shape::Circle(circle)) => other
            .as_polygon()
            .and_then(|polygon| test_polygon_circle(polygon, a_pos, circle, b_pos)),
        (a, b) => match (a.as_polygon(), b.as_polygon()) {
            (Some(a), Some(b)) => test_polygon_polygon(a, a_pos, b, b_pos),
            _ => None,
        },
    }
}

/// Returns true if the two shapes overlap
pub fn shapes_collide(a: &Shape, a_pos: Vector2, b: &Shape, b_pos: Vector2) -> bool {
    test_shapes(a, a_pos, b, b_pos).is_some()
}

/// Returns true if `point` lies inside (or on) the circle
pub fn point_in_circle(point: Vector2, circle: &Circle, circle_pos: Vector2) -> bool {
    let difference = point - circle.center(circle_pos);
    let radius = circle.get_radius();

    difference.length_squared() <= radius * radius
}

/// Returns true if `point` lies inside the polygon
pub fn point_in_polygon(point: Vector2, polygon: &Polygon, polygon_pos: Vector2) -> bool {
    separating_axis_test(
        point,
        &PROBE_POINTS,
        &PROBE_NORMALS,
        polygon_pos,
        polygon.get_calc_points(),
        polygon.get_normals(),
    )
    .map_or(false, |details| details.a_in_b())
}

/// Returns true if `point` lies inside the shape of a body at `position`
pub fn point_in_shape(point: Vector2, shape: &Shape, position: Vector2) -> bool {
    match shape {
        Shape::Circle(circle) => point_in_circle(point, circle, position),
        other => other
            .as_polygon()
            .map_or(false, |polygon| point_in_polygon(point, polygon, position)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voronoi_regions_split_on_edge_ends() {
        let edge = Vector2::new(2.0, 0.0);
        assert_eq!(voronoi_region(edge, Vector2::new(-0.5, 1.0)), VoronoiRegion::Left);
        assert_eq!(voronoi_region(edge, Vector2::new(1.0, 1.0)), VoronoiRegion::Middle);
        assert_eq!(voronoi_region(edge, Vector2::new(2.0, -3.0)), VoronoiRegion::Middle);
        assert_eq!(voronoi_region(edge, Vector2::new(2.5, 0.0)), VoronoiRegion::Right);
    }

    #[test]
    fn flatten_returns_projection_range() {
        let points = [Vector2::new(1.0, 5.0), Vector2::new(-3.0, 0.0), Vector2::new(2.0, -1.0)];
        assert_eq!(flatten_points_on(&points, Vector2::unit_x()), (-3.0, 2.0));
        assert_eq!(flatten_points_on(&points, Vector2::unit_y()), (-1.0, 5.0));
    }

    #[test]
    fn separating_axis_rejects_disjoint_ranges() {
        let points = [Vector2::new(-1.0, 0.0), Vector2::new(1.0, 0.0)];
        let mut details = CollisionDetails::new(ShapeKind::Polygon, ShapeKind::Polygon);

        assert!(is_separating_axis(
            Vector2::zero(),
            Vector2::new(3.0, 0.0),
            &points,
            &points,
            Vector2::unit_x(),
            &mut details,
        ));
        assert_eq!(details.overlap, f32::MAX);
    }

    #[test]
    fn overlap_axis_flips_when_b_is_behind() {
        let points = [Vector2::new(-1.0, 0.0), Vector2::new(1.0, 0.0)];
        let mut details = CollisionDetails::new(ShapeKind::Polygon, ShapeKind::Polygon);

        assert!(!is_separating_axis(
            Vector2::zero(),
            Vector2::new(-1.5, 0.0),
            &points,
            &points,
            Vector2::unit_x(),
            &mut details,
        ));
        assert!((details.overlap - 0.5).abs() < 1e-6);
        assert_eq!(details.overlap_unit, Vector2::new(-1.0, 0.0));
        assert!(!details.a_in_b());
        assert!(!details.b_in_a());
    }

    #[test]
    fn strictly_smaller_overlap_wins() {
        let points = [Vector2::new(-1.0, 0.0), Vector2::new(1.0, 0.0)];
        let mut details = CollisionDetails::new(ShapeKind::Polygon, ShapeKind::Polygon);
        details.overlap = 0.5;
        details.overlap_unit = Vector2::unit_y();

        is_separating_axis(
            Vector2::zero(),
            Vector2::new(1.5, 0.0),
            &points,
            &points,
            Vector2::unit_x(),
            &mut details,
        );
        assert_eq!(details.overlap_unit, Vector2::unit_y());
    }
}

use planar_phys::{
    collision::{
        self, point_in_circle, point_in_polygon, point_in_shape, shapes_collide,
        test_circle_circle, test_circle_polygon, test_polygon_circle, test_polygon_polygon,
        test_shapes,
    },
    shapes::{BoxShape, Circle, Polygon, Shape, ShapeKind},
    math::Vector2,
};
use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn test_circle_circle_symmetry() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let a = Circle::new(rng.gen_range(0.1..3.0));
        let b = Circle::new(rng.gen_range(0.1..3.0));
        let a_pos = Vector2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));
        let b_pos = Vector2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));

        let ab = test_circle_circle(&a, a_pos, &b, b_pos);
        let ba = test_circle_circle(&b, b_pos, &a, a_pos);
        assert_eq!(ab.is_some(), ba.is_some());

        if let (Some(ab), Some(ba)) = (ab, ba) {
            assert_relative_eq!(ab.overlap, ba.overlap, epsilon = 1e-5);
            assert_relative_eq!(ab.overlap_unit, ba.overlap_unit.reverse(), epsilon = 1e-5);
        }
    }
}

#[test]
fn test_overlapping_circles_report_exact_depth() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
        let r1 = rng.gen_range(0.5..2.0);
        let r2 = rng.gen_range(0.5..2.0);
        let d = rng.gen_range(0.01..(r1 + r2) * 0.99);
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let b_pos = Vector2::unit_x().rotate(angle) * d;

        let details = test_circle_circle(&Circle::new(r1), Vector2::zero(), &Circle::new(r2), b_pos)
            .expect("circles closer than their radii must collide");

        assert_relative_eq!(details.overlap, r1 + r2 - d, epsilon = 1e-4);
        assert_relative_eq!(details.overlap_unit.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(details.overlap_v, details.overlap_unit * details.overlap, epsilon = 1e-5);
    }
}

#[test]
fn test_separated_circles_do_not_collide() {
    let a = Circle::new(1.0);
    let b = Circle::new(2.0);

    assert!(test_circle_circle(&a, Vector2::zero(), &b, Vector2::new(3.01, 0.0)).is_none());
    assert!(test_circle_circle(&a, Vector2::zero(), &b, Vector2::new(0.0, -10.0)).is_none());
}

#[test]
fn test_circle_containment() {
    let small = Circle::new(1.0);
    let big = Circle::new(5.0);

    let details = test_circle_circle(&small, Vector2::zero(), &big, Vector2::zero()).unwrap();
    assert!(details.a_in_b());
    assert!(!details.b_in_a());
    assert_eq!(details.overlap, 6.0);

    let details = test_circle_circle(&big, Vector2::zero(), &small, Vector2::new(1.0, 1.0)).unwrap();
    assert!(!details.a_in_b());
    assert!(details.b_in_a());
}

#[test]
fn test_polygon_polygon_exact_overlap() {
    let a = BoxShape::new(2.0, 2.0);
    let b = BoxShape::new(2.0, 2.0);

    let details = test_polygon_polygon(
        a.as_polygon(),
        Vector2::zero(),
        b.as_polygon(),
        Vector2::new(1.5, 0.0),
    )
    .unwrap();

    assert_relative_eq!(details.overlap, 0.5);
    assert_relative_eq!(details.overlap_unit, Vector2::new(1.0, 0.0));
    assert_relative_eq!(details.overlap_v, Vector2::new(0.5, 0.0));
    assert!(!details.a_in_b());
    assert!(!details.b_in_a());
}

#[test]
fn test_polygon_polygon_separated() {
    let a = BoxShape::new(2.0, 2.0);
    let triangle = Polygon::from_points(&[[0.0, 0.0], [2.0, 0.0], [1.0, 2.0]]);

    assert!(test_polygon_polygon(a.as_polygon(), Vector2::zero(), &triangle, Vector2::new(2.5, 0.0)).is_none());
    assert!(test_polygon_polygon(a.as_polygon(), Vector2::zero(), &triangle, Vector2::new(0.5, 0.5)).is_some());
}

#[test]
fn test_polygon_containment() {
    let small = BoxShape::new(1.0, 1.0);
    let big = BoxShape::new(4.0, 4.0);

    let details = test_polygon_polygon(small.as_polygon(), Vector2::zero(), big.as_polygon(), Vector2::zero()).unwrap();
    assert!(details.a_in_b());
    assert!(!details.b_in_a());
}

#[test]
fn test_circle_resting_on_box_face() {
    let floor = BoxShape::new(4.0, 2.0);
    let ball = Circle::new(1.0);

    // Polygon first: axis points from the box up toward the circle
    let details = test_polygon_circle(floor.as_polygon(), Vector2::zero(), &ball, Vector2::new(0.0, 1.5)).unwrap();
    assert_eq!(details.a, ShapeKind::Polygon);
    assert_relative_eq!(details.overlap, 0.5);
    assert_relative_eq!(details.overlap_unit, Vector2::new(0.0, 1.0));

    // Circle first: everything flips
    let details = test_circle_polygon(&ball, Vector2::new(0.0, 1.5), floor.as_polygon(), Vector2::zero()).unwrap();
    assert_eq!(details.a, ShapeKind::Circle);
    assert_eq!(details.b, ShapeKind::Polygon);
    assert_relative_eq!(details.overlap, 0.5);
    assert_relative_eq!(details.overlap_unit, Vector2::new(0.0, -1.0));
    assert_relative_eq!(details.overlap_v, Vector2::new(0.0, -0.5));
}

#[test]
fn test_circle_against_box_corner() {
    let block = BoxShape::new(4.0, 2.0);
    let ball = Circle::new(1.0);

    // Corner at (2, 1); centre is sqrt(0.5) away from it
    let details = test_polygon_circle(block.as_polygon(), Vector2::zero(), &ball, Vector2::new(2.5, 1.5)).unwrap();
    let diagonal = Vector2::new(1.0, 1.0).normalize();
    assert_relative_eq!(details.overlap_unit, diagonal, epsilon = 1e-6);
    assert_relative_eq!(details.overlap, 1.0 - 0.5f32.sqrt(), epsilon = 1e-6);

    // Centre sqrt(2) from the corner, outside both adjacent faces' reach
    assert!(test_polygon_circle(block.as_polygon(), Vector2::zero(), &ball, Vector2::new(3.0, 2.0)).is_none());
}

#[test]
fn test_polygon_winding_does_not_matter() {
    let ccw = Polygon::from_points(&[[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]);
    let cw = Polygon::from_points(&[[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0]]);
    let ball = Circle::new(0.5);
    let ball_pos = Vector2::new(1.3, 0.0);

    let from_ccw = test_polygon_circle(&ccw, Vector2::zero(), &ball, ball_pos).unwrap();
    let from_cw = test_polygon_circle(&cw, Vector2::zero(), &ball, ball_pos)
        .expect("clockwise outline must still detect the overlap");

    assert_relative_eq!(from_cw.overlap, from_ccw.overlap, epsilon = 1e-6);
    assert_relative_eq!(from_cw.overlap, 0.2, epsilon = 1e-5);
    assert_relative_eq!(from_cw.overlap_unit, Vector2::new(1.0, 0.0), epsilon = 1e-6);
    assert_eq!(from_cw.containment, from_ccw.containment);

    let square = BoxShape::new(2.0, 2.0);
    let from_box = test_polygon_polygon(&cw, Vector2::zero(), square.as_polygon(), Vector2::new(1.5, 0.0)).unwrap();
    assert_relative_eq!(from_box.overlap, 0.5);
    assert_relative_eq!(from_box.overlap_unit, Vector2::new(1.0, 0.0));
}

#[test]
fn test_circle_inside_polygon() {
    let room = BoxShape::new(4.0, 4.0);
    let ball = Circle::new(0.5);

    let details = test_circle_polygon(&ball, Vector2::new(0.2, -0.3), room.as_polygon(), Vector2::zero()).unwrap();
    assert!(details.a_in_b());
    assert!(!details.b_in_a());
}

#[test]
fn test_shape_dispatch() {
    let circle = Shape::from(Circle::new(1.0));
    let square = Shape::from(BoxShape::new(2.0, 2.0));

    let details = test_shapes(&circle, Vector2::new(0.0, 1.5), &square, Vector2::zero()).unwrap();
    assert_relative_eq!(details.overlap_unit, Vector2::new(0.0, -1.0));

    let details = test_shapes(&square, Vector2::zero(), &circle, Vector2::new(0.0, 1.5)).unwrap();
    assert_relative_eq!(details.overlap_unit, Vector2::new(0.0, 1.0));

    assert!(shapes_collide(&square, Vector2::zero(), &square, Vector2::new(1.9, 1.9)));
    assert!(!shapes_collide(&circle, Vector2::zero(), &circle, Vector2::new(2.1, 0.0)));
}

#[test]
fn test_point_queries() {
    let circle = Circle::new(1.0);
    assert!(point_in_circle(Vector2::new(5.5, 5.5), &circle, Vector2::new(5.0, 5.0)));
    assert!(!point_in_circle(Vector2::new(6.5, 5.0), &circle, Vector2::new(5.0, 5.0)));

    let square = BoxShape::new(2.0, 2.0);
    assert!(point_in_polygon(Vector2::new(5.5, 5.5), square.as_polygon(), Vector2::new(5.0, 5.0)));
    assert!(!point_in_polygon(Vector2::new(7.0, 5.0), square.as_polygon(), Vector2::new(5.0, 5.0)));

    let shape = Shape::from(square);
    assert!(point_in_shape(Vector2::new(4.2, 4.2), &shape, Vector2::new(5.0, 5.0)));
    assert!(!point_in_shape(Vector2::zero(), &shape, Vector2::new(5.0, 5.0)));
}

#[test]
fn test_rotated_polygon_uses_transformed_points() {
    let mut square = BoxShape::new(2.0, 2.0);
    square.as_polygon_mut().set_angle(std::f32::consts::FRAC_PI_4);

    // Rotated 45 degrees, the corner reaches sqrt(2) along the x axis
    assert!(point_in_polygon(Vector2::new(1.3, 0.0), square.as_polygon(), Vector2::zero()));
    assert!(!point_in_polygon(Vector2::new(0.9, 0.9), square.as_polygon(), Vector2::zero()));
}

#[test]
fn test_repeated_queries_are_independent() {
    let ball = Shape::from(Circle::new(1.0));
    let block = Shape::from(BoxShape::new(4.0, 2.0));
    let wedge = Shape::from(Polygon::from_points(&[[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]]));

    let queries = [
        (&ball, Vector2::new(0.0, 1.5), &block, Vector2::zero()),
        (&block, Vector2::zero(), &wedge, Vector2::new(10.0, 0.0)),
        (&wedge, Vector2::zero(), &block, Vector2::new(1.0, 1.0)),
        (&ball, Vector2::new(3.0, 2.0), &block, Vector2::zero()),
        (&ball, Vector2::zero(), &ball, Vector2::new(1.0, 0.0)),
    ];

    let first: Vec<_> = queries
        .iter()
        .map(|(a, a_pos, b, b_pos)| test_shapes(a, *a_pos, b, *b_pos))
        .collect();

    // Same queries, reverse order, several times over
    for _ in 0..5 {
        for (index, (a, a_pos, b, b_pos)) in queries.iter().enumerate().rev() {
            assert_eq!(test_shapes(a, *a_pos, b, *b_pos), first[index]);
        }
    }

    assert!(first[0].is_some());
    assert!(first[1].is_none());
    assert!(first[3].is_none());
}

#[test]
fn test_segment_helpers_are_exposed() {
    let hit = collision::segment::segment_intersection(
        Vector2::new(-1.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(0.0, -1.0),
        Vector2::new(0.0, 1.0),
    )
    .unwrap();
    assert_eq!(hit, Some(Vector2::zero()));
}

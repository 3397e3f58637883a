mod collision_details;
pub mod collider;
pub mod segment;

pub use self::collision_details::{CollisionDetails, Containment};
pub use self::collider::{
    test_circle_circle, test_circle_polygon, test_polygon_circle, test_polygon_polygon,
    test_shapes, shapes_collide, point_in_circle, point_in_polygon, point_in_shape,
};

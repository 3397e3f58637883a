mod shape;
mod circle;
mod polygon;
pub mod box_shape;

pub use self::shape::{Shape, ShapeKind};
pub use self::circle::Circle;
pub use self::polygon::Polygon;
pub use self::box_shape::BoxShape;

use crate::shapes::{Circle, Polygon, BoxShape};
use crate::math::Vector2;

/// Broad category of a shape, as seen by the collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

/// A collision shape attached to a body.
///
/// Shapes never store the body's position; every query takes it as an
/// argument so the body stays the single owner of where it is.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
    Box(BoxShape),
}

impl Shape {
    /// Returns the type name of the shape
    pub fn shape_type(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "Circle",
            Shape::Polygon(_) => "Polygon",
            Shape::Box(_) => "Box",
        }
    }

    /// Boxes collide as polygons
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) | Shape::Box(_) => ShapeKind::Polygon,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// Returns the polygon for both `Polygon` and `Box` shapes
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            Shape::Box(shape) => Some(shape.as_polygon()),
            Shape::Circle(_) => None,
        }
    }

    pub fn get_offset(&self) -> Vector2 {
        match self {
            Shape::Circle(circle) => circle.get_offset(),
            Shape::Polygon(polygon) => polygon.get_offset(),
            Shape::Box(shape) => shape.as_polygon().get_offset(),
        }
    }

    /// Sets the local translation, rebuilding polygon geometry
    pub fn set_offset(&mut self, offset: Vector2) {
        match self {
            Shape::Circle(circle) => circle.set_offset(offset),
            Shape::Polygon(polygon) => polygon.set_offset(offset),
            Shape::Box(shape) => shape.as_polygon_mut().set_offset(offset),
        }
    }

    pub fn get_angle(&self) -> f32 {
        match self {
            Shape::Circle(circle) => circle.get_angle(),
            Shape::Polygon(polygon) => polygon.get_angle(),
            Shape::Box(shape) => shape.as_polygon().get_angle(),
        }
    }

    /// Sets the local rotation, rebuilding polygon geometry
    pub fn set_angle(&mut self, angle: f32) {
        match self {
            Shape::Circle(circle) => circle.set_angle(angle),
            Shape::Polygon(polygon) => polygon.set_angle(angle),
            Shape::Box(shape) => shape.as_polygon_mut().set_angle(angle),
        }
    }

    /// World-space centre of the shape for a body at `position`
    pub fn center(&self, position: Vector2) -> Vector2 {
        match self {
            Shape::Circle(circle) => circle.center(position),
            Shape::Polygon(polygon) => polygon.center(position),
            Shape::Box(shape) => shape.as_polygon().center(position),
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<BoxShape> for Shape {
    fn from(shape: BoxShape) -> Self {
        Shape::Box(shape)
    }
}

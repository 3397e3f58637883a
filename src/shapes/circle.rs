use crate::math::Vector2;

/// A circular collision shape
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// The radius of the circle
    radius: f32,

    /// Translation from the owning body's position to the circle's centre
    offset: Vector2,

    /// Local rotation; a circle looks the same at any angle but the value is kept
    angle: f32,
}

impl Circle {
    /// Creates a new circle with the given radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
            offset: Vector2::zero(),
            angle: 0.0,
        }
    }

    /// Returns the radius of the circle
    pub fn get_radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius of the circle
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    pub fn get_offset(&self) -> Vector2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vector2) {
        self.offset = offset;
    }

    pub fn get_angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// World-space centre for a body at `position`
    pub fn center(&self, position: Vector2) -> Vector2 {
        position + self.offset
    }

    /// Area of the circle
    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }
}

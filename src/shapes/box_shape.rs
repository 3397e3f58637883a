use crate::shapes::Polygon;
use crate::math::Vector2;

/// An axis-aligned (before rotation) rectangle, stored as a four-point polygon
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    width: f32,
    height: f32,
    polygon: Polygon,
}

impl BoxShape {
    /// Creates a new box with the given full dimensions
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);

        Self {
            width,
            height,
            polygon: Polygon::new(Self::corners(width, height).to_vec()),
        }
    }

    pub fn get_width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.set_size(width, self.height);
    }

    pub fn get_height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.set_size(self.width, height);
    }

    /// Sets both dimensions and regenerates the corner points
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.polygon.set_points(Self::corners(self.width, self.height).to_vec());
    }

    /// Returns the underlying polygon
    pub fn as_polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Returns the underlying polygon for offset/angle changes
    pub fn as_polygon_mut(&mut self) -> &mut Polygon {
        &mut self.polygon
    }

    // Counter-clockwise, starting bottom-left
    fn corners(width: f32, height: f32) -> [Vector2; 4] {
        let x = width / 2.0;
        let y = height / 2.0;

        [
            Vector2::new(-x, -y),
            Vector2::new(x, -y),
            Vector2::new(x, y),
            Vector2::new(-x, y),
        ]
    }
}

use crate::math::{Vector2, EPSILON};

/// A convex polygon collision shape.
///
/// Points are given in local space; clockwise input is reversed so the
/// stored winding is always counter-clockwise (y up).
/// The transformed points, edges and outward normals are cached and rebuilt
/// whenever the points, offset or angle change.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Local-space vertices
    points: Vec<Vector2>,

    /// Translation applied to every point before rotation
    offset: Vector2,

    /// Rotation applied after the offset
    angle: f32,

    /// Points with offset and angle applied, relative to the body position
    calc_points: Vec<Vector2>,

    /// `calc_points[i + 1] - calc_points[i]`, wrapping
    edges: Vec<Vector2>,

    /// Unit outward normal of each edge
    normals: Vec<Vector2>,
}

impl Polygon {
    /// Creates a new polygon from local-space vertices
    pub fn new(points: Vec<Vector2>) -> Self {
        let mut polygon = Self {
            points: Vec::new(),
            offset: Vector2::zero(),
            angle: 0.0,
            calc_points: Vec::new(),
            edges: Vec::new(),
            normals: Vec::new(),
        };

        polygon.set_points(points);

        polygon
    }

    /// Creates a polygon from `[x, y]` pairs
    pub fn from_points(points: &[[f32; 2]]) -> Self {
        Self::new(points.iter().copied().map(Vector2::from).collect())
    }

    pub fn get_points(&self) -> &[Vector2] {
        &self.points
    }

    /// Replaces the vertices.
    ///
    /// Consecutive duplicate points (including a last point equal to the
    /// first) are dropped and clockwise outlines are reversed. An empty list
    /// is ignored.
    pub fn set_points(&mut self, mut points: Vec<Vector2>) {
        if points.is_empty() {
            log::warn!("ignoring empty point list for polygon");
            return;
        }

        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        // Normals are outward only for counter-clockwise winding
        if signed_area(&points) < 0.0 {
            points.reverse();
        }

        self.points = points;
        self.recalculate();
    }

    /// Vertices with offset and angle applied, relative to the body position
    pub fn get_calc_points(&self) -> &[Vector2] {
        &self.calc_points
    }

    pub fn get_edges(&self) -> &[Vector2] {
        &self.edges
    }

    pub fn get_normals(&self) -> &[Vector2] {
        &self.normals
    }

    pub fn get_offset(&self) -> Vector2 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: Vector2) {
        self.offset = offset;
        self.recalculate();
    }

    pub fn get_angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.recalculate();
    }

    /// Rotates the local points themselves (as opposed to setting `angle`)
    pub fn rotate(&mut self, angle: f32) {
        for point in &mut self.points {
            point.rotate_mut(angle);
        }

        self.recalculate();
    }

    /// Moves the local points themselves
    pub fn translate(&mut self, x: f32, y: f32) {
        let delta = Vector2::new(x, y);
        for point in &mut self.points {
            *point += delta;
        }

        self.recalculate();
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area of the transformed polygon (positive for counter-clockwise winding)
    pub fn area(&self) -> f32 {
        self.shoelace().2 / 2.0
    }

    /// Area-weighted centroid of the transformed points, relative to the body position.
    ///
    /// Falls back to the vertex mean for degenerate (zero-area) outlines.
    pub fn centroid(&self) -> Vector2 {
        let (cx, cy, twice_area) = self.shoelace();

        if twice_area.abs() < EPSILON {
            if self.calc_points.is_empty() {
                return Vector2::zero();
            }
            let sum = self.calc_points.iter().fold(Vector2::zero(), |acc, p| acc + *p);
            return sum / self.calc_points.len() as f32;
        }

        let denominator = twice_area * 3.0;
        Vector2::new(cx / denominator, cy / denominator)
    }

    /// World-space centre for a body at `position`
    pub fn center(&self, position: Vector2) -> Vector2 {
        position + self.centroid()
    }

    // Returns the centroid accumulators and twice the signed area
    fn shoelace(&self) -> (f32, f32, f32) {
        let points = &self.calc_points;
        let len = points.len();

        let mut cx = 0.0;
        let mut cy = 0.0;
        let mut twice_area = 0.0;

        for i in 0..len {
            let p1 = points[i];
            let p2 = points[(i + 1) % len];

            let a = p1.x * p2.y - p2.x * p1.y;

            cx += (p1.x + p2.x) * a;
            cy += (p1.y + p2.y) * a;
            twice_area += a;
        }

        (cx, cy, twice_area)
    }

    fn recalculate(&mut self) {
        let offset = self.offset;
        let angle = self.angle;

        self.calc_points.clear();
        self.calc_points.extend(self.points.iter().map(|point| {
            let moved = *point + offset;
            if angle != 0.0 {
                moved.rotate(angle)
            } else {
                moved
            }
        }));

        let len = self.calc_points.len();

        self.edges.clear();
        self.normals.clear();

        for i in 0..len {
            let p1 = self.calc_points[i];
            let p2 = self.calc_points[(i + 1) % len];

            let edge = p2 - p1;
            self.edges.push(edge);
            self.normals.push(edge.perp().normalize());
        }
    }
}

// Twice the signed area of an outline, positive when counter-clockwise
fn signed_area(points: &[Vector2]) -> f32 {
    let len = points.len();
    (0..len)
        .map(|i| points[i].cross(&points[(i + 1) % len]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::from_points(&[[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]])
    }

    #[test]
    fn caches_match_point_count() {
        let polygon = square();
        assert_eq!(polygon.get_calc_points().len(), 4);
        assert_eq!(polygon.get_edges().len(), 4);
        assert_eq!(polygon.get_normals().len(), 4);
    }

    #[test]
    fn normals_point_outward() {
        let polygon = square();
        let normals = polygon.get_normals();
        assert_relative_eq!(normals[0], Vector2::new(0.0, -1.0));
        assert_relative_eq!(normals[1], Vector2::new(1.0, 0.0));
        assert_relative_eq!(normals[2], Vector2::new(0.0, 1.0));
        assert_relative_eq!(normals[3], Vector2::new(-1.0, 0.0));
    }

    #[test]
    fn duplicate_points_are_removed() {
        let polygon = Polygon::from_points(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 0.0],
            [2.0, 2.0],
            [0.0, 0.0],
        ]);
        assert_eq!(polygon.len(), 3);
        assert_eq!(polygon.get_normals().len(), 3);
    }

    #[test]
    fn empty_points_are_ignored() {
        let mut polygon = square();
        polygon.set_points(Vec::new());
        assert_eq!(polygon.len(), 4);
    }

    #[test]
    fn offset_and_angle_rebuild_geometry() {
        let mut polygon = square();
        polygon.set_offset(Vector2::new(1.0, 0.0));
        assert_relative_eq!(polygon.get_calc_points()[0], Vector2::new(0.0, -1.0));

        polygon.set_angle(std::f32::consts::FRAC_PI_2);
        // (0, -1) rotated a quarter turn counter-clockwise
        assert_relative_eq!(polygon.get_calc_points()[0], Vector2::new(1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn centroid_of_offset_triangle() {
        let polygon = Polygon::from_points(&[[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]]);
        assert_relative_eq!(polygon.centroid(), Vector2::new(1.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(polygon.area(), 4.5);
        assert_relative_eq!(
            polygon.center(Vector2::new(10.0, 0.0)),
            Vector2::new(11.0, 1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn clockwise_points_are_rewound() {
        let polygon = Polygon::from_points(&[[-1.0, -1.0], [-1.0, 1.0], [1.0, 1.0], [1.0, -1.0]]);
        assert!(polygon.area() > 0.0);
        assert_eq!(polygon.get_points()[0], Vector2::new(1.0, -1.0));
        assert_relative_eq!(polygon.get_normals()[0], Vector2::new(1.0, 0.0));
    }

    #[test]
    fn degenerate_centroid_uses_vertex_mean() {
        let polygon = Polygon::from_points(&[[0.0, 0.0], [2.0, 0.0], [4.0, 0.0]]);
        assert_relative_eq!(polygon.centroid(), Vector2::new(2.0, 0.0));
    }
}

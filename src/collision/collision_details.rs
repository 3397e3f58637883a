use bitflags::bitflags;
use crate::core::BodyHandle;
use crate::math::Vector2;
use crate::shapes::ShapeKind;

bitflags! {
    /// Whether one shape lies entirely inside the other
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Containment: u8 {
        /// Shape `a` is fully inside shape `b`
        const A_IN_B = 0x01;

        /// Shape `b` is fully inside shape `a`
        const B_IN_A = 0x02;
    }
}

impl Default for Containment {
    fn default() -> Self {
        Self::all()
    }
}

/// The result of a detailed collision query between two shapes.
///
/// `overlap_unit` points from `a` toward `b` along the axis of least
/// penetration. Subtracting `overlap_v` from the position of `a` separates
/// the two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionDetails {
    /// Kind of the first shape
    pub a: ShapeKind,

    /// Kind of the second shape
    pub b: ShapeKind,

    /// Penetration depth
    pub overlap: f32,

    /// Unit axis of least penetration, from `a` toward `b`
    pub overlap_unit: Vector2,

    /// `overlap_unit * overlap`
    pub overlap_v: Vector2,

    /// Containment flags; both start set and are cleared by contrary evidence
    pub containment: Containment,

    /// Body owning `a`, when the query went through a body
    pub body_a: Option<BodyHandle>,

    /// Body owning `b`, when the query went through a body
    pub body_b: Option<BodyHandle>,
}

impl CollisionDetails {
    /// Creates an empty record for a query between shapes of the given kinds
    pub fn new(a: ShapeKind, b: ShapeKind) -> Self {
        Self {
            a,
            b,
            overlap: f32::MAX,
            overlap_unit: Vector2::zero(),
            overlap_v: Vector2::zero(),
            containment: Containment::all(),
            body_a: None,
            body_b: None,
        }
    }

    /// Resets overlap and containment to their initial state
    pub fn clear(&mut self) {
        self.containment = Containment::all();
        self.overlap = f32::MAX;
        self.overlap_unit = Vector2::zero();
        self.overlap_v = Vector2::zero();
    }

    pub fn a_in_b(&self) -> bool {
        self.containment.contains(Containment::A_IN_B)
    }

    pub fn b_in_a(&self) -> bool {
        self.containment.contains(Containment::B_IN_A)
    }

    /// Attaches the owning bodies
    pub fn with_bodies(mut self, body_a: BodyHandle, body_b: BodyHandle) -> Self {
        self.body_a = Some(body_a);
        self.body_b = Some(body_b);
        self
    }

    /// Returns the same collision seen from `b`'s side
    pub fn swapped(self) -> Self {
        let mut containment = Containment::empty();
        containment.set(Containment::A_IN_B, self.b_in_a());
        containment.set(Containment::B_IN_A, self.a_in_b());

        Self {
            a: self.b,
            b: self.a,
            overlap: self.overlap,
            overlap_unit: self.overlap_unit.reverse(),
            overlap_v: self.overlap_v.reverse(),
            containment,
            body_a: self.body_b,
            body_b: self.body_a,
        }
    }

    // Recomputes overlap_v from the unit axis and depth
    pub(crate) fn finish(&mut self) {
        self.overlap_v = self.overlap_unit * self.overlap;
    }
}

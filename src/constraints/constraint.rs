use crate::bodies::RigidBody;
use crate::core::BodyHandle;
use crate::math::Vector2;

/// What a constraint pulls its body toward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintTarget {
    /// A point in world space, moved by the caller (e.g. a cursor)
    Point(Vector2),

    /// The live position of another body
    Body(BodyHandle),
}

/// A one-sided spring tether.
///
/// While the body is at least `min_length` away from the target, a force of
/// `stiffness * (distance - min_length)` pulls it toward the target. Inside
/// `min_length` the constraint does nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    target: ConstraintTarget,
    min_length: f32,
    stiffness: f32,
}

impl Constraint {
    /// Creates a new constraint
    pub fn new(target: ConstraintTarget, min_length: f32, stiffness: f32) -> Self {
        Self {
            target,
            min_length: min_length.max(0.0),
            stiffness: stiffness.max(0.0),
        }
    }

    /// Tethers to a fixed world point
    pub fn to_point(point: Vector2, min_length: f32, stiffness: f32) -> Self {
        Self::new(ConstraintTarget::Point(point), min_length, stiffness)
    }

    /// Tethers to another body's position
    pub fn to_body(body: BodyHandle, min_length: f32, stiffness: f32) -> Self {
        Self::new(ConstraintTarget::Body(body), min_length, stiffness)
    }

    pub fn get_target(&self) -> ConstraintTarget {
        self.target
    }

    pub fn set_target(&mut self, target: ConstraintTarget) {
        self.target = target;
    }

    /// Moves a point target; has no effect on body targets
    pub fn set_target_point(&mut self, point: Vector2) {
        if let ConstraintTarget::Point(current) = &mut self.target {
            *current = point;
        }
    }

    pub fn get_min_length(&self) -> f32 {
        self.min_length
    }

    pub fn set_min_length(&mut self, min_length: f32) {
        self.min_length = min_length.max(0.0);
    }

    pub fn get_stiffness(&self) -> f32 {
        self.stiffness
    }

    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.stiffness = stiffness.max(0.0);
    }

    /// Checks if the constraint tracks a specific body
    pub fn involves_body(&self, body: BodyHandle) -> bool {
        self.target == ConstraintTarget::Body(body)
    }

    /// Velocity change for a body of `mass` at `position` pulled toward `target` over `dt`
    pub fn velocity_change(&self, position: Vector2, mass: f32, target: Vector2, dt: f32) -> Vector2 {
        let diff = target - position;
        let dist = diff.length();

        if dist < self.min_length {
            return Vector2::zero();
        }

        let stretch = dist - self.min_length;
        let force = diff.normalize() * (self.stiffness * stretch);

        force * (dt / mass)
    }

    /// Applies the pull directly to `body`
    pub fn apply(&self, body: &mut RigidBody, target: Vector2, dt: f32) {
        let change = self.velocity_change(body.get_position(), body.get_mass(), target, dt);
        body.set_velocity(body.get_velocity() + change);
    }
}

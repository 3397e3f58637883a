use crate::bodies::RigidBodyType;
use crate::collision::{self, CollisionDetails};
use crate::constraints::{Constraint, ConstraintTarget};
use crate::core::{BodyHandle, ConstraintHandle, WorldView};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::shapes::Shape;
use crate::Result;

/// Default fraction of speed lost when a body bounces off another
pub const DEFAULT_COLLISION_VELOCITY_LOSS: f32 = 0.1;

/// Creation parameters for a rigid body
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyOptions {
    pub body_type: RigidBodyType,
    pub mass: f32,
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,

    /// `None` takes the world's configured loss (or the crate default outside a world)
    pub collision_velocity_loss: Option<f32>,
}

impl Default for RigidBodyOptions {
    fn default() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            mass: 1.0,
            position: Vector2::zero(),
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            collision_velocity_loss: None,
        }
    }
}

impl RigidBodyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a body that never moves
    pub fn fixed() -> Self {
        Self {
            body_type: RigidBodyType::Static,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vector2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_collision_velocity_loss(mut self, loss: f32) -> Self {
        self.collision_velocity_loss = Some(loss);
        self
    }
}

/// Position, velocity and acceleration of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KinematicState {
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
}

/// A rigid body for physics simulation
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Assigned when the body is added to a world
    handle: Option<BodyHandle>,

    /// The body's collision shape
    shape: Shape,

    /// The body's position in world space
    position: Vector2,

    /// The body's linear velocity
    velocity: Vector2,

    /// Constant acceleration added each tick, cleared by a collision
    acceleration: Vector2,

    /// The body's type (dynamic or static)
    body_type: RigidBodyType,

    /// The body's mass
    mass: f32,

    /// Fraction of speed lost when bouncing off another body
    collision_velocity_loss: f32,

    /// Tethers applied every tick, in insertion order
    constraints: Vec<(ConstraintHandle, Constraint)>,

    next_constraint_id: u32,
}

impl RigidBody {
    /// Creates a body from a shape and creation options
    pub fn create(shape: impl Into<Shape>, options: RigidBodyOptions) -> Result<Self> {
        if !options.mass.is_finite() || options.mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass must be positive and finite, got {}",
                options.mass
            )));
        }

        if !options.position.is_finite()
            || !options.velocity.is_finite()
            || !options.acceleration.is_finite()
        {
            return Err(PhysicsError::InvalidParameter(
                "position, velocity and acceleration must be finite".to_string(),
            ));
        }

        let loss = options
            .collision_velocity_loss
            .unwrap_or(DEFAULT_COLLISION_VELOCITY_LOSS);
        if !(0.0..=1.0).contains(&loss) {
            return Err(PhysicsError::InvalidParameter(format!(
                "collision_velocity_loss must be within [0, 1], got {}",
                loss
            )));
        }

        Ok(Self {
            handle: None,
            shape: shape.into(),
            position: options.position,
            velocity: options.velocity,
            acceleration: options.acceleration,
            body_type: options.body_type,
            mass: options.mass,
            collision_velocity_loss: loss,
            constraints: Vec::new(),
            next_constraint_id: 1,
        })
    }

    /// Creates a new dynamic body with unit mass at the given position
    pub fn new_dynamic(shape: impl Into<Shape>, position: Vector2) -> Self {
        Self::with_defaults(shape.into(), position, RigidBodyType::Dynamic)
    }

    /// Creates a new static body at the given position
    pub fn new_static(shape: impl Into<Shape>, position: Vector2) -> Self {
        Self::with_defaults(shape.into(), position, RigidBodyType::Static)
    }

    fn with_defaults(shape: Shape, position: Vector2, body_type: RigidBodyType) -> Self {
        Self {
            handle: None,
            shape,
            position,
            velocity: Vector2::zero(),
            acceleration: Vector2::zero(),
            body_type,
            mass: 1.0,
            collision_velocity_loss: DEFAULT_COLLISION_VELOCITY_LOSS,
            constraints: Vec::new(),
            next_constraint_id: 1,
        }
    }

    /// Returns the handle assigned by the world, if the body has been added to one
    pub fn get_handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    pub(crate) fn set_handle(&mut self, handle: BodyHandle) {
        self.handle = Some(handle);
    }

    pub fn get_shape(&self) -> &Shape {
        &self.shape
    }

    /// Mutable access for offset, angle and size changes
    pub fn get_shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn set_shape(&mut self, shape: impl Into<Shape>) {
        self.shape = shape.into();
    }

    pub fn get_position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn get_velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn get_acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vector2) {
        self.acceleration = acceleration;
    }

    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the body's mass, which must be positive and finite
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "mass must be positive and finite, got {}",
                mass
            )));
        }
        self.mass = mass;
        Ok(())
    }

    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    pub fn set_body_type(&mut self, body_type: RigidBodyType) {
        self.body_type = body_type;
    }

    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    pub fn get_collision_velocity_loss(&self) -> f32 {
        self.collision_velocity_loss
    }

    /// Sets the fraction of speed lost on collision, clamped to `[0, 1]`
    pub fn set_collision_velocity_loss(&mut self, loss: f32) {
        self.collision_velocity_loss = crate::math::clamp(loss, 0.0, 1.0);
    }

    /// World-space centre of the body's shape
    pub fn center(&self) -> Vector2 {
        self.shape.center(self.position)
    }

    /// Attaches a constraint and returns a handle for removing it later
    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintHandle {
        let handle = ConstraintHandle(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.push((handle, constraint));
        handle
    }

    /// Detaches one constraint, keeping the order of the rest
    pub fn remove_constraint(&mut self, handle: ConstraintHandle) -> Option<Constraint> {
        let index = self.constraints.iter().position(|(h, _)| *h == handle)?;
        Some(self.constraints.remove(index).1)
    }

    pub fn get_constraint(&self, handle: ConstraintHandle) -> Option<&Constraint> {
        self.constraints
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, constraint)| constraint)
    }

    /// Mutable access, e.g. to move a point target
    pub fn get_constraint_mut(&mut self, handle: ConstraintHandle) -> Option<&mut Constraint> {
        self.constraints
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, constraint)| constraint)
    }

    /// Constraints in application order
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintHandle, &Constraint)> {
        self.constraints.iter().map(|(handle, constraint)| (*handle, constraint))
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Drops every constraint that tracks `body`
    pub(crate) fn remove_constraints_on(&mut self, body: BodyHandle) -> usize {
        let before = self.constraints.len();
        self.constraints.retain(|(_, constraint)| !constraint.involves_body(body));
        before - self.constraints.len()
    }

    /// Detailed collision query against another body.
    ///
    /// The result is oriented from this body toward `other`.
    pub fn collision_with(&self, other: &RigidBody) -> Option<CollisionDetails> {
        let details = collision::test_shapes(&self.shape, self.position, &other.shape, other.position)?;

        Some(match (self.handle, other.handle) {
            (Some(a), Some(b)) => details.with_bodies(a, b),
            _ => details,
        })
    }

    /// Returns true if `point` lies inside the body's shape
    pub fn collides_with_point(&self, point: Vector2) -> bool {
        collision::point_in_shape(point, &self.shape, self.position)
    }

    /// First body in world order that overlaps this one
    pub fn current_collision(&self, world: &WorldView<'_>) -> Option<CollisionDetails> {
        world.others().find_map(|other| self.collision_with(other))
    }

    pub(crate) fn kinematic_state(&self) -> KinematicState {
        KinematicState {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
        }
    }

    pub(crate) fn restore_kinematic_state(&mut self, state: KinematicState) {
        self.position = state.position;
        self.velocity = state.velocity;
        self.acceleration = state.acceleration;
    }

    /// Advances the body by `dt` seconds.
    ///
    /// Gravity and constraints change the velocity, the velocity moves the
    /// body, and if the body then overlaps another one it is pushed back out
    /// along the collision axis with its velocity reflected and damped. Only
    /// this body is changed. Returns the collision that was resolved.
    pub fn update(&mut self, dt: f32, world: &WorldView<'_>) -> Result<Option<CollisionDetails>> {
        if self.is_static() || !(dt > 0.0) {
            return Ok(None);
        }

        // Gravity as an impulse of gravity * mass * dt, divided back by mass
        self.velocity += world.gravity() * self.mass * dt / self.mass;

        for (_, constraint) in &self.constraints {
            let target = match constraint.get_target() {
                ConstraintTarget::Point(point) => point,
                ConstraintTarget::Body(body) if Some(body) == self.handle => self.position,
                ConstraintTarget::Body(body) => world
                    .body(body)
                    .map(RigidBody::get_position)
                    .ok_or_else(|| {
                        PhysicsError::ResourceNotFound(format!(
                            "Constraint target body {:?} not found",
                            body
                        ))
                    })?,
            };

            self.velocity += constraint.velocity_change(self.position, self.mass, target, dt);
        }

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        let collision = self.current_collision(world);

        if let Some(details) = &collision {
            self.acceleration = Vector2::zero();
            self.position -= details.overlap_v;
            self.velocity = self
                .velocity
                .reflect_unit(&details.overlap_unit)
                .reverse()
                * (1.0 - self.collision_velocity_loss);
        }

        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(PhysicsError::SimulationError(format!(
                "body {:?} reached a non-finite state (position {}, velocity {})",
                self.handle, self.position, self.velocity
            )));
        }

        Ok(collision)
    }
}

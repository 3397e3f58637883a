use crate::core::{
    BodyHandle, ConstraintHandle, SimulationConfig,
    EventQueue, BodyEvent, CollisionEvent, BodyStorage,
};
use crate::core::events::BodyEventType;
use crate::bodies::{RigidBody, RigidBodyOptions};
use crate::collision::CollisionDetails;
use crate::constraints::{Constraint, ConstraintTarget};
use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::shapes::Shape;
use crate::Result;

/// Read-only view of the world handed to a body while it updates.
///
/// The body being updated is excluded; `before` and `after` are the bodies
/// that precede and follow it in world order.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    gravity: Vector2,
    before: &'a [RigidBody],
    after: &'a [RigidBody],
}

impl<'a> WorldView<'a> {
    pub fn new(gravity: Vector2, before: &'a [RigidBody], after: &'a [RigidBody]) -> Self {
        Self { gravity, before, after }
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    /// Every other body, in world order
    pub fn others(&self) -> impl Iterator<Item = &'a RigidBody> {
        self.before.iter().chain(self.after.iter())
    }

    /// Looks up another body by handle
    pub fn body(&self, handle: BodyHandle) -> Option<&'a RigidBody> {
        self.others().find(|body| body.get_handle() == Some(handle))
    }
}

/// The main physics world that owns every body and advances the simulation
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    /// All rigid bodies in the world, in insertion order
    bodies: BodyStorage,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Queue of physics events
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            bodies: BodyStorage::new(),
            config,
            events: EventQueue::new(),
            time: 0.0,
        })
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.config.gravity = gravity;
    }

    pub fn get_gravity(&self) -> Vector2 {
        self.config.gravity
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration after validating it
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Adds a rigid body to the world and returns its handle
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = self.bodies.add(body);
        log::debug!("added body {:?}", handle);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });

        handle
    }

    /// Creates a body from a shape and options and adds it to the world.
    ///
    /// A body created without an explicit collision loss takes the world's.
    pub fn create_rigid_body(
        &mut self,
        shape: impl Into<Shape>,
        mut options: RigidBodyOptions,
    ) -> Result<BodyHandle> {
        if options.collision_velocity_loss.is_none() {
            options.collision_velocity_loss = Some(self.config.collision_velocity_loss);
        }

        let body = RigidBody::create(shape, options)?;
        Ok(self.add_body(body))
    }

    /// Removes a rigid body from the world.
    ///
    /// Constraints on other bodies that track it are dropped as well.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let body = self.bodies.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
        })?;

        let dropped: usize = self
            .bodies
            .iter_mut()
            .map(|other| other.remove_constraints_on(handle))
            .sum();
        log::debug!("removed body {:?} and {} constraints tracking it", handle, dropped);

        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Removed,
            body: handle,
        });

        Ok(body)
    }

    /// Gets a reference to a rigid body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a rigid body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.bodies.get_body_mut(handle)
    }

    /// All bodies in world order
    pub fn get_bodies(&self) -> &[RigidBody] {
        self.bodies.as_slice()
    }

    /// Handles of all bodies in world order
    pub fn body_handles(&self) -> Vec<BodyHandle> {
        self.bodies.handles()
    }

    /// Attaches a constraint to `body`
    pub fn add_constraint(&mut self, body: BodyHandle, constraint: Constraint) -> Result<ConstraintHandle> {
        if let ConstraintTarget::Body(target) = constraint.get_target() {
            if self.bodies.get(target).is_none() {
                return Err(PhysicsError::ResourceNotFound(format!(
                    "Constraint target body {:?} not found",
                    target
                )));
            }
        }

        let handle = self.bodies.get_body_mut(body)?.add_constraint(constraint);
        log::debug!("attached constraint {:?} to body {:?}", handle, body);

        Ok(handle)
    }

    /// Detaches a constraint from `body`
    pub fn remove_constraint(&mut self, body: BodyHandle, handle: ConstraintHandle) -> Result<Constraint> {
        self.bodies.get_body_mut(body)?.remove_constraint(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!(
                "Constraint {:?} not found on body {:?}",
                handle, body
            ))
        })
    }

    /// Tethers two bodies to each other with a symmetric pair of constraints
    pub fn constrain_bodies(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
        min_length: f32,
        stiffness: f32,
    ) -> Result<(ConstraintHandle, ConstraintHandle)> {
        self.bodies.get_body(a)?;
        self.bodies.get_body(b)?;

        let on_a = self.add_constraint(a, Constraint::to_body(b, min_length, stiffness))?;
        let on_b = self.add_constraint(b, Constraint::to_body(a, min_length, stiffness))?;

        Ok((on_a, on_b))
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Bodies update one after another in world order; each sees the others
    /// as they are at that moment, so earlier bodies have already moved. A
    /// failing body rolls every body back to where it was before the call.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        if !dt.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "time step must be finite, got {}",
                dt
            )));
        }

        if !self.config.enabled || dt <= 0.0 {
            return Ok(());
        }

        let dt = dt.min(self.config.max_time_step);
        self.events.clear();

        let snapshot: Vec<_> = self.bodies.iter().map(RigidBody::kinematic_state).collect();

        if let Err(err) = self.step_bodies(dt) {
            for (body, state) in self.bodies.iter_mut().zip(snapshot) {
                body.restore_kinematic_state(state);
            }
            self.events.clear();
            log::warn!("update of {}s rolled back: {}", dt, err);
            return Err(err);
        }

        self.time += dt;
        Ok(())
    }

    fn step_bodies(&mut self, dt: f32) -> Result<()> {
        let gravity = self.config.gravity;
        let bodies = self.bodies.as_mut_slice();

        for index in 0..bodies.len() {
            let (before, rest) = bodies.split_at_mut(index);
            let (current, after) = rest.split_at_mut(1);
            let view = WorldView::new(gravity, before, after);

            if let Some(details) = current[0].update(dt, &view)? {
                log::trace!(
                    "body {:?} pushed out of {:?} by {}",
                    details.body_a,
                    details.body_b,
                    details.overlap
                );

                if let Some(event) = CollisionEvent::from_details(&details) {
                    self.events.add_collision_event(event);
                }
            }
        }

        Ok(())
    }

    /// Detailed collision between two bodies, oriented from `a` toward `b`
    pub fn collision_between(&self, a: BodyHandle, b: BodyHandle) -> Result<Option<CollisionDetails>> {
        let body_a = self.bodies.get_body(a)?;
        let body_b = self.bodies.get_body(b)?;
        Ok(body_a.collision_with(body_b))
    }

    /// First body in world order that overlaps `body`
    pub fn current_collision(&self, body: BodyHandle) -> Result<Option<CollisionDetails>> {
        let index = self.bodies.index_of(body).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", body))
        })?;

        let bodies = self.bodies.as_slice();
        let view = WorldView::new(self.config.gravity, &bodies[..index], &bodies[index + 1..]);
        Ok(bodies[index].current_collision(&view))
    }

    /// First body in world order whose shape contains `point`
    pub fn body_at_point(&self, point: Vector2) -> Option<BodyHandle> {
        self.bodies
            .iter()
            .find(|body| body.collides_with_point(point))
            .and_then(RigidBody::get_handle)
    }

    /// Returns a reference to the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Clears the world of all bodies and events
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.events.clear();
        self.time = 0.0;
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Circle;

    #[test]
    fn view_excludes_the_current_body() {
        let mut world = PhysicsWorld::new();
        let a = world.add_body(RigidBody::new_static(Circle::new(1.0), Vector2::zero()));
        let b = world.add_body(RigidBody::new_static(Circle::new(1.0), Vector2::new(5.0, 0.0)));
        let c = world.add_body(RigidBody::new_static(Circle::new(1.0), Vector2::new(9.0, 0.0)));

        let bodies = world.get_bodies();
        let view = WorldView::new(Vector2::zero(), &bodies[..1], &bodies[2..]);

        let seen: Vec<_> = view.others().filter_map(RigidBody::get_handle).collect();
        assert_eq!(seen, vec![a, c]);
        assert!(view.body(b).is_none());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SimulationConfig {
            max_time_step: -1.0,
            ..SimulationConfig::default()
        };
        assert!(PhysicsWorld::with_config(config).is_err());
    }

    #[test]
    fn nan_time_step_is_an_error() {
        let mut world = PhysicsWorld::new();
        assert!(matches!(
            world.update(f32::NAN),
            Err(PhysicsError::InvalidParameter(_))
        ));
    }
}

use crate::bodies::RigidBody;
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Ordered storage for rigid bodies.
///
/// Insertion order is iteration order, and therefore update order.
/// Removing a body keeps the relative order of the rest.
#[derive(Debug)]
pub struct BodyStorage {
    bodies: Vec<RigidBody>,
    next_id: u32,
}

impl BodyStorage {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    /// Adds a body, assigns it a fresh handle and returns that handle
    pub fn add(&mut self, mut body: RigidBody) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        body.set_handle(handle);
        self.bodies.push(body);
        handle
    }

    /// Position of a body in update order
    pub fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies
            .iter()
            .position(|body| body.get_handle() == Some(handle))
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.index_of(handle).map(|index| &self.bodies[index])
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let index = self.index_of(handle)?;
        Some(&mut self.bodies[index])
    }

    /// Removes a body, preserving the order of the others
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.index_of(handle).map(|index| self.bodies.remove(index))
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Removes every body; handles keep counting up
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Handles in update order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.iter().filter_map(RigidBody::get_handle).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> {
        self.bodies.iter_mut()
    }

    pub fn as_slice(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn as_mut_slice(&mut self) -> &mut [RigidBody] {
        &mut self.bodies
    }
}

impl Default for BodyStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use crate::shapes::Circle;

    fn body_at(x: f32) -> RigidBody {
        RigidBody::new_dynamic(Circle::new(1.0), Vector2::new(x, 0.0))
    }

    #[test]
    fn handles_are_unique_and_ordered() {
        let mut storage = BodyStorage::new();
        let a = storage.add(body_at(0.0));
        let b = storage.add(body_at(1.0));
        let c = storage.add(body_at(2.0));

        assert_ne!(a, b);
        assert_eq!(storage.handles(), vec![a, b, c]);
    }

    #[test]
    fn removal_keeps_order() {
        let mut storage = BodyStorage::new();
        let a = storage.add(body_at(0.0));
        let b = storage.add(body_at(1.0));
        let c = storage.add(body_at(2.0));

        let removed = storage.remove(b).unwrap();
        assert_eq!(removed.get_position(), Vector2::new(1.0, 0.0));
        assert_eq!(storage.handles(), vec![a, c]);
        assert!(storage.get_body(b).is_err());
    }

    #[test]
    fn handles_are_not_reused_after_clear() {
        let mut storage = BodyStorage::new();
        let a = storage.add(body_at(0.0));
        storage.clear();
        let b = storage.add(body_at(0.0));
        assert_ne!(a, b);
    }
}

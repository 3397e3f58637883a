pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::{PhysicsWorld, WorldView};
pub use self::config::SimulationConfig;
pub use self::storage::BodyStorage;
pub use self::events::{EventQueue, CollisionEvent, BodyEvent, BodyEventType};

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

/// Identifies a constraint attached to a particular body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintHandle(pub(crate) u32);

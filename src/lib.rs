pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod constraints;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SimulationConfig, BodyHandle, ConstraintHandle};
pub use crate::bodies::{RigidBody, RigidBodyOptions, RigidBodyType};
pub use crate::collision::CollisionDetails;
pub use crate::constraints::{Constraint, ConstraintTarget};
pub use crate::shapes::{Shape, Circle, Polygon, BoxShape};
pub use crate::math::Vector2;

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Simulation stability error: {0}")]
        SimulationError(String),

        #[error("Geometric invariant violated: {0}")]
        InvariantViolation(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

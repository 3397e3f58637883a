mod rigid_body;
mod body_type;

pub use self::rigid_body::{RigidBody, RigidBodyOptions};
pub use self::body_type::RigidBodyType;

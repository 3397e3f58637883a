/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RigidBodyType {
    /// Dynamic bodies fall, follow constraints and are pushed out of collisions
    #[default]
    Dynamic,

    /// Static bodies never move on their own but other bodies collide with them
    Static,
}

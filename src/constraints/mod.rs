mod constraint;

pub use self::constraint::{Constraint, ConstraintTarget};

use crate::error::PhysicsError;
use crate::math::Vector2;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Acceleration applied to every dynamic body, in world units per second squared
    pub gravity: Vector2,

    /// Upper bound for a single update's time step; larger steps are clamped
    pub max_time_step: f32,

    /// When false, `update` does nothing
    pub enabled: bool,

    /// Fraction of speed lost on collision for bodies created without an explicit value
    pub collision_velocity_loss: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, -500.0),
            max_time_step: 1.0 / 60.0,
            enabled: true,
            collision_velocity_loss: 0.1,
        }
    }
}

impl SimulationConfig {
    /// Checks that every value is usable by the simulation
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }

        if !self.max_time_step.is_finite() || self.max_time_step <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "max_time_step must be positive and finite, got {}",
                self.max_time_step
            )));
        }

        if !(0.0..=1.0).contains(&self.collision_velocity_loss) {
            return Err(PhysicsError::InvalidParameter(format!(
                "collision_velocity_loss must be within [0, 1], got {}",
                self.collision_velocity_loss
            )));
        }

        Ok(())
    }
}

//! Motion configuration and constants

use serde::{Deserialize, Serialize};
use skirmish_physics::layers;

/// Motion tuning for the character controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Upward impulse applied when jumping
    pub jump_force: f32,
    /// Fraction of movement speed kept while crouching (0.0-1.0)
    pub crouch_speed: f32,
    /// Movement smoothing time constant in seconds (0.0-0.3)
    pub movement_smoothing: f32,
    /// Extra gravity multiplier while falling (0.0-5.0)
    pub fall_multiplier: f32,
    /// Whether movement input steers the character while airborne
    pub air_control: bool,
    /// Radius of the ground-check overlap probe
    pub grounded_radius: f32,
    /// Radius of the ceiling-check overlap probe
    pub ceiling_radius: f32,
    /// Collision-layer bits both probes treat as ground
    pub ground_layers: u32,
    /// Whether zero horizontal input resets the movement direction to
    /// "not right"; set false to keep the last direction while idle
    pub idle_resets_direction: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            jump_force: 400.0,
            crouch_speed: 0.36,
            movement_smoothing: 0.05,
            fall_multiplier: 2.0,
            air_control: false,
            grounded_radius: 0.2,
            ceiling_radius: 0.2,
            ground_layers: layers::GROUND_BIT,
            idle_resets_direction: true,
        }
    }
}

impl MotionConfig {
    /// Check that all tuning values are inside their supported ranges
    pub fn validate(&self) -> Result<(), MotionConfigError> {
        if !(0.0..=1.0).contains(&self.crouch_speed) {
            return Err(MotionConfigError::CrouchSpeed(self.crouch_speed));
        }
        if !(0.0..=0.3).contains(&self.movement_smoothing) {
            return Err(MotionConfigError::MovementSmoothing(self.movement_smoothing));
        }
        if !(0.0..=5.0).contains(&self.fall_multiplier) {
            return Err(MotionConfigError::FallMultiplier(self.fall_multiplier));
        }
        if self.grounded_radius <= 0.0 || self.ceiling_radius <= 0.0 {
            return Err(MotionConfigError::ProbeRadius);
        }
        Ok(())
    }
}

/// Errors for motion tuning values outside their supported ranges
#[derive(Debug, Clone, thiserror::Error)]
pub enum MotionConfigError {
    #[error("crouch_speed must be within 0.0-1.0, got {0}")]
    CrouchSpeed(f32),

    #[error("movement_smoothing must be within 0.0-0.3, got {0}")]
    MovementSmoothing(f32),

    #[error("fall_multiplier must be within 0.0-5.0, got {0}")]
    FallMultiplier(f32),

    #[error("probe radii must be positive")]
    ProbeRadius,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MotionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = MotionConfig {
            crouch_speed: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MotionConfigError::CrouchSpeed(_))));

        let config = MotionConfig {
            movement_smoothing: -0.01,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MotionConfigError::MovementSmoothing(_))
        ));

        let config = MotionConfig {
            fall_multiplier: 9.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MotionConfigError::FallMultiplier(_))));

        let config = MotionConfig {
            grounded_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MotionConfigError::ProbeRadius)));
    }
}

//! Simulation context: physical constants and arena bounds
//!
//! Everything here is fixed for the lifetime of a run. Values are per tick:
//! gravity is a velocity increment per tick, max velocity is units per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dividers::GoalDividers;
use crate::consts::*;
use crate::error::ConfigError;
use crate::{per_tick, per_tick_squared};

/// Axis-aligned arena rectangle (y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub left: f32,
    pub right: f32,
    pub floor: f32,
    pub ceiling: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: SIM_WIDTH,
            floor: 0.0,
            ceiling: SIM_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(left: f32, right: f32, floor: f32, ceiling: f32) -> Self {
        Self {
            left,
            right,
            floor,
            ceiling,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.ceiling - self.floor
    }

    /// Width and height as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// Bottom-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.left, self.floor)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.floor && p.y <= self.ceiling
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width(), self.height());
        // Negated comparison also rejects NaN
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::InvalidArena { width, height });
        }
        Ok(())
    }
}

/// How side walls correct a ball that crossed them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallMode {
    /// Reflect, damp and clamp x back inside (same as floor and ceiling)
    #[default]
    Reposition,
    /// Reflect and damp only; x is left where integration put it
    ReflectOnly,
}

/// How the velocity ceiling is enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Clamp each component to [-max, max]
    #[default]
    PerAxis,
    /// Rescale the whole vector so its length is at most max
    Magnitude,
}

/// Process-wide simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Velocity added to y each tick (negative = down)
    pub gravity: f32,
    /// Velocity multiplier applied each tick before gravity
    pub air_damping: f32,
    /// Velocity ceiling (units/tick)
    pub max_velocity: f32,
    pub arena: Arena,
    /// Number of ticks in a run
    pub loop_threshold: u64,
    /// Gap left between a corrected ball and the surface it hit
    pub contact_epsilon: f32,
    pub wall_mode: WallMode,
    pub clamp_mode: ClampMode,
    /// Walls between the goal slots; off unless set
    pub goal_dividers: Option<GoalDividers>,
}

impl Default for SimConfig {
    /// The full board at `SAMPLE_RATE`, converted to per-tick units
    fn default() -> Self {
        Self {
            gravity: -per_tick_squared(GRAVITY),
            air_damping: AIR_DAMPING_PER_SECOND.powf(1.0 / SAMPLE_RATE),
            max_velocity: per_tick(MAX_VELOCITY),
            arena: Arena::default(),
            loop_threshold: (SAMPLE_RATE * 30.0) as u64,
            contact_epsilon: CONTACT_EPSILON,
            wall_mode: WallMode::default(),
            clamp_mode: ClampMode::default(),
            goal_dividers: None,
        }
    }
}

impl SimConfig {
    /// Check every scalar against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;

        if !(0.0..=1.0).contains(&self.air_damping) {
            return Err(ConfigError::AirDampingOutOfRange(self.air_damping));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFiniteGravity(self.gravity));
        }
        if !(self.max_velocity > 0.0 && self.max_velocity.is_finite()) {
            return Err(ConfigError::InvalidMaxVelocity(self.max_velocity));
        }
        if !(self.contact_epsilon >= 0.0 && self.contact_epsilon.is_finite()) {
            return Err(ConfigError::InvalidEpsilon(self.contact_epsilon));
        }
        if let Some(dividers) = &self.goal_dividers {
            dividers.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.gravity < 0.0);
        assert!(config.air_damping > 0.999 && config.air_damping <= 1.0);
        assert_eq!(config.loop_threshold, 3840);
    }

    #[test]
    fn test_air_damping_out_of_range() {
        let config = SimConfig {
            air_damping: 1.01,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AirDampingOutOfRange(1.01))
        );

        let config = SimConfig {
            air_damping: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_arena_rejected() {
        let config = SimConfig {
            arena: Arena::new(10.0, 10.0, 0.0, 5.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidArena { .. })
        ));

        let config = SimConfig {
            arena: Arena::new(0.0, 10.0, 5.0, f32::NAN),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_velocity_must_be_positive() {
        let config = SimConfig {
            max_velocity: 0.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxVelocity(0.0)));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "gravity": -9.8, "wall_mode": "reflect_only" }"#).unwrap();
        assert_eq!(config.gravity, -9.8);
        assert_eq!(config.wall_mode, WallMode::ReflectOnly);
        assert_eq!(config.clamp_mode, ClampMode::PerAxis);
        assert_eq!(config.arena, Arena::default());
        assert_eq!(config.goal_dividers, None);
    }

    #[test]
    fn test_invalid_dividers_fail_config() {
        let config = SimConfig {
            goal_dividers: Some(GoalDividers {
                slots: 5,
                height: -1.0,
            }),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDividers { slots: 5, .. })
        ));
    }

    #[test]
    fn test_arena_contains() {
        let arena = Arena::new(-10.0, 10.0, 0.0, 20.0);
        assert!(arena.contains(Vec2::new(0.0, 0.0)));
        assert!(arena.contains(Vec2::new(10.0, 20.0)));
        assert!(!arena.contains(Vec2::new(10.1, 5.0)));
        assert!(!arena.contains(Vec2::new(0.0, -0.1)));
    }
}

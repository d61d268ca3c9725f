//! Body store: balls and pins
//!
//! Bodies live in dense vectors. A body's index is its id for the whole run;
//! nothing is ever removed, so indices stay stable and iteration order is
//! deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::Arena;
use crate::consts::*;
use crate::error::{BodyKind, ConfigError};

/// A falling ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    #[serde(default = "default_ball_radius")]
    pub radius: f32,
    /// Fraction of velocity kept after any collision (1 = elastic)
    #[serde(default = "default_restitution")]
    pub restitution: f32,
}

fn default_ball_radius() -> f32 {
    BALL_RADIUS
}

fn default_restitution() -> f32 {
    BOUNCE_DAMPING
}

impl Ball {
    /// Ball at rest at `pos`
    pub fn new(pos: Vec2, radius: f32, restitution: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            restitution,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                kind: BodyKind::Ball,
                index,
                radius: self.radius,
            });
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::RestitutionOutOfRange {
                index,
                value: self.restitution,
            });
        }
        if !self.pos.is_finite() || !self.vel.is_finite() {
            return Err(ConfigError::NonFiniteBall { index });
        }
        Ok(())
    }
}

/// A static circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub pos: Vec2,
    #[serde(default = "default_pin_radius")]
    pub radius: f32,
}

fn default_pin_radius() -> f32 {
    PIN_RADIUS
}

impl Pin {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ConfigError::InvalidRadius {
                kind: BodyKind::Pin,
                index,
                radius: self.radius,
            });
        }
        if !self.pos.is_finite() {
            return Err(ConfigError::NonFinitePin { index });
        }
        Ok(())
    }
}

/// All bodies of a run. Pins are read-only once the store is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyStore {
    balls: Vec<Ball>,
    pins: Vec<Pin>,
}

impl BodyStore {
    pub fn new(balls: Vec<Ball>, pins: Vec<Pin>) -> Self {
        Self { balls, pins }
    }

    /// Append a ball, returning its index
    pub fn add_ball(&mut self, ball: Ball) -> usize {
        self.balls.push(ball);
        self.balls.len() - 1
    }

    /// Append a pin, returning its index
    pub fn add_pin(&mut self, pin: Pin) -> usize {
        self.pins.push(pin);
        self.pins.len() - 1
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Split borrow used by the tick driver: mutable balls, shared pins
    pub(crate) fn split_mut(&mut self) -> (&mut [Ball], &[Pin]) {
        (&mut self.balls, &self.pins)
    }

    /// Check every body, and that each ball fits inside the arena
    pub fn validate(&self, arena: &Arena, epsilon: f32) -> Result<(), ConfigError> {
        for (index, ball) in self.balls.iter().enumerate() {
            ball.validate(index)?;
            let diameter = 2.0 * (ball.radius + epsilon);
            if diameter >= arena.width() || diameter >= arena.height() {
                return Err(ConfigError::BallDoesNotFit {
                    index,
                    radius: ball.radius,
                });
            }
        }
        for (index, pin) in self.pins.iter().enumerate() {
            pin.validate(index)?;
        }
        Ok(())
    }
}

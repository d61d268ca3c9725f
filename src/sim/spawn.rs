//! Seeded ball drops
//!
//! Stands in for a player clicking along the top of the board: balls appear
//! at random x positions near the ceiling, at rest. The RNG is seeded so a
//! scenario always produces the same drops.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::Arena;
use super::state::Ball;
use crate::consts::*;
use crate::error::ConfigError;

/// How many balls to drop and where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnPlan {
    pub count: usize,
    pub seed: u64,
    /// Drop height; defaults to just below the ceiling
    pub height: Option<f32>,
    pub radius: f32,
    pub restitution: f32,
}

impl Default for SpawnPlan {
    fn default() -> Self {
        Self {
            count: 1,
            seed: 0,
            height: None,
            radius: BALL_RADIUS,
            restitution: BOUNCE_DAMPING,
        }
    }
}

impl SpawnPlan {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius > 0.0 && self.radius.is_finite())
            || !(0.0..=1.0).contains(&self.restitution)
        {
            return Err(ConfigError::InvalidSpawn);
        }
        Ok(())
    }

    /// Generate the balls, spread uniformly between the walls
    ///
    /// Falls back to the arena's center line when there is no finite range
    /// to draw from; `BodyStore::validate` rejects what that produces.
    pub fn spawn(&self, arena: &Arena) -> Vec<Ball> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let y = self
            .height
            .unwrap_or(arena.ceiling - self.radius - CONTACT_EPSILON);
        let min_x = arena.left + self.radius;
        let max_x = arena.right - self.radius;

        (0..self.count)
            .map(|_| {
                let x = if max_x > min_x && (max_x - min_x).is_finite() {
                    rng.random_range(min_x..max_x)
                } else {
                    arena.left + arena.width() / 2.0
                };
                Ball::new(Vec2::new(x, y), self.radius, self.restitution)
            })
            .collect()
    }
}

//! Goal dividers
//!
//! Thin vertical walls rising from the floor between neighboring goal slots.
//! Only balls inside the goal zone (at or below the divider tops) touch them.
//! A ball whose center is closer than its radius to a divider is pushed to
//! that divider's side, its x velocity flips and the whole velocity is damped.

use serde::{Deserialize, Serialize};

use super::boundary::{Axis, bounce_on_axis};
use super::config::Arena;
use super::state::Ball;
use crate::consts::GOAL_ZONE_FRACTION;
use crate::error::ConfigError;

/// Upper bound on the slot count accepted from a scenario
pub const MAX_GOAL_SLOTS: u32 = 1024;

/// Dividers between `slots` equal goal slots spanning the arena width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalDividers {
    /// Number of slots; there is one divider fewer
    pub slots: u32,
    /// Divider height above the floor
    pub height: f32,
}

impl GoalDividers {
    /// `slots` is bumped to the next odd number so one slot sits on the center line
    pub fn new(arena: &Arena, slots: u32) -> Self {
        Self {
            slots: if slots % 2 == 0 { slots + 1 } else { slots },
            height: arena.height() * GOAL_ZONE_FRACTION,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_GOAL_SLOTS).contains(&self.slots)
            || !(self.height >= 0.0 && self.height.is_finite())
        {
            return Err(ConfigError::InvalidDividers {
                slots: self.slots,
                height: self.height,
                max: MAX_GOAL_SLOTS,
            });
        }
        Ok(())
    }

    /// Divider numbers and their x positions, left to right. Divider `i`
    /// separates slot `i - 1` from slot `i`; the side walls are not dividers.
    pub fn positions(&self, arena: &Arena) -> impl Iterator<Item = (u32, f32)> {
        let left = arena.left;
        let width = arena.width() / self.slots as f32;
        (1..self.slots).map(move |i| (i, left + i as f32 * width))
    }

    /// Top of the goal zone
    #[inline]
    pub fn top(&self, arena: &Arena) -> f32 {
        arena.floor + self.height
    }
}

/// Resolve one ball against every divider, returning the dividers it hit
pub fn resolve_dividers(
    ball: &mut Ball,
    dividers: &GoalDividers,
    arena: &Arena,
    epsilon: f32,
) -> Vec<u32> {
    let mut hits = Vec::new();
    if ball.pos.y > dividers.top(arena) {
        return hits;
    }

    for (divider, x) in dividers.positions(arena) {
        let dx = ball.pos.x - x;
        if dx.abs() >= ball.radius {
            continue;
        }
        let corrected = if dx < 0.0 {
            x - ball.radius - epsilon
        } else {
            x + ball.radius + epsilon
        };
        bounce_on_axis(ball, Axis::X, Some(corrected));
        hits.push(divider);
    }

    hits
}

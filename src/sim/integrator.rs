//! Per-tick motion integration
//!
//! Order matters: damping acts on last tick's velocity, then gravity lands
//! undamped, then the clamp, then the position update.

use glam::Vec2;

use super::config::{ClampMode, SimConfig};
use super::state::Ball;

/// Advance one ball by one tick under gravity and air damping
pub fn integrate(ball: &mut Ball, config: &SimConfig) {
    ball.vel *= config.air_damping;
    ball.vel.y += config.gravity;
    ball.vel = clamp_velocity(ball.vel, config.max_velocity, config.clamp_mode);
    ball.pos += ball.vel;
}

/// Enforce the velocity ceiling
#[inline]
pub fn clamp_velocity(vel: Vec2, max: f32, mode: ClampMode) -> Vec2 {
    match mode {
        ClampMode::PerAxis => vel.clamp(Vec2::splat(-max), Vec2::splat(max)),
        ClampMode::Magnitude => vel.clamp_length_max(max),
    }
}

//! Simulation-space to screen-space mapping
//!
//! The simulation has y pointing up; screens have y pointing down. Nothing
//! here draws anything, it only gives a renderer pixel coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::Arena;

/// Linear map from the arena rectangle onto a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenTransform {
    pub arena: Arena,
    /// Window size in pixels
    pub window: Vec2,
}

impl ScreenTransform {
    pub fn new(arena: Arena, window: Vec2) -> Result<Self, ConfigError> {
        arena.validate()?;
        if !(window.x > 0.0 && window.y > 0.0) {
            return Err(ConfigError::InvalidWindow {
                width: window.x,
                height: window.y,
            });
        }
        Ok(Self { arena, window })
    }

    /// Window of the given height with the arena's aspect ratio
    pub fn fit_height(arena: Arena, window_height: f32) -> Result<Self, ConfigError> {
        arena.validate()?;
        let width = window_height * arena.width() / arena.height();
        Self::new(arena, Vec2::new(width, window_height))
    }

    /// Pixel position of a simulation point
    #[inline]
    pub fn to_screen(&self, pos: Vec2) -> Vec2 {
        let t = (pos - self.arena.min()) / self.arena.size();
        Vec2::new(t.x * self.window.x, self.window.y - t.y * self.window.y)
    }

    /// Pixel length of a horizontal simulation length (e.g. a radius)
    #[inline]
    pub fn scale_length(&self, length: f32) -> f32 {
        length * self.window.x / self.arena.width()
    }
}

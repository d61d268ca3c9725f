//! Staggered pin grid layout
//!
//! Rows alternate between an odd, centered row and a row shifted by half a
//! spacing with one extra pin on each side. Pins falling outside the arena's
//! side walls are dropped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::Arena;
use super::state::Pin;
use crate::error::ConfigError;

/// Upper bound on grid rows and columns accepted from a scenario
pub const MAX_GRID_SIZE: u32 = 1024;

/// Parameters of a staggered (triangular) pin grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinGrid {
    pub rows: u32,
    /// Pins in an unshifted row (kept odd so one pin sits on the center line)
    pub columns: u32,
    /// Horizontal distance between neighboring pins
    pub spacing: f32,
    /// Vertical distance between rows
    pub row_spacing: f32,
    /// x of the center column
    pub center_x: f32,
    /// y of the lowest row; later rows stack upward
    pub first_row_y: f32,
    pub pin_radius: f32,
}

impl PinGrid {
    /// Fill the arena width with rows spaced so a ball always has to hit
    /// something on the way down. Starts 10% of the arena height above the
    /// floor.
    pub fn centered(arena: &Arena, rows: u32, ball_radius: f32, pin_radius: f32) -> Self {
        let spacing = 3.0 * ball_radius + 3.0 * pin_radius;

        let mut columns = (arena.width() / spacing).floor() as u32;
        if columns % 2 == 0 {
            columns = columns.saturating_sub(1);
        }

        Self {
            rows,
            columns: columns.max(1),
            spacing,
            // Equilateral triangles
            row_spacing: spacing * 60.0_f32.to_radians().sin(),
            center_x: arena.left + arena.width() / 2.0,
            first_row_y: arena.floor + arena.height() * 0.1,
            pin_radius,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns % 2 == 0 || self.columns > MAX_GRID_SIZE || self.rows > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidGridSize {
                rows: self.rows,
                columns: self.columns,
                max: MAX_GRID_SIZE,
            });
        }
        if !(self.spacing > 0.0 && self.row_spacing > 0.0)
            || !self.spacing.is_finite()
            || !self.row_spacing.is_finite()
        {
            return Err(ConfigError::InvalidGridSpacing {
                spacing: self.spacing,
                row_spacing: self.row_spacing,
            });
        }
        Ok(())
    }

    /// Lay out the pins, bottom row first, left to right within a row
    pub fn generate(&self, arena: &Arena) -> Vec<Pin> {
        let half = i64::from(self.columns / 2);
        let mut pins = Vec::new();

        for row in 0..self.rows {
            let y = self.first_row_y + row as f32 * self.row_spacing;
            let staggered = row % 2 == 1;
            let (first, last) = if staggered {
                (-half - 1, half + 1)
            } else {
                (-half, half)
            };

            for i in first..=last {
                let mut x = self.center_x + i as f32 * self.spacing;
                if staggered {
                    x += self.spacing / 2.0;
                }
                if x >= arena.left && x <= arena.right {
                    pins.push(Pin::new(Vec2::new(x, y), self.pin_radius));
                }
            }
        }

        log::debug!(
            "Generated {} rows of pins, {} per full row, {} total",
            self.rows,
            self.columns,
            pins.len()
        );
        pins
    }
}

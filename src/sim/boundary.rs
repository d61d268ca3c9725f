//! Arena boundary collisions
//!
//! The four boundaries share one routine, parameterized by axis. Each axis
//! is checked independently with a low/high `else if`, so a ball can hit at
//! most one boundary per axis but may hit both a wall and the floor in the
//! same tick.

use serde::{Deserialize, Serialize};

use super::config::{Arena, SimConfig, WallMode};
use super::state::Ball;

/// A boundary of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Floor,
    Ceiling,
    Left,
    Right,
}

/// Coordinate axis a boundary is perpendicular to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// A pair of opposing boundaries along one axis
#[derive(Debug, Clone, Copy)]
pub struct AxisBounds {
    pub axis: Axis,
    pub low: f32,
    pub high: f32,
    pub low_side: Side,
    pub high_side: Side,
    /// Clamp the coordinate back inside on contact
    pub reposition: bool,
}

impl AxisBounds {
    /// Floor and ceiling. These always reposition.
    pub fn vertical(arena: &Arena) -> Self {
        Self {
            axis: Axis::Y,
            low: arena.floor,
            high: arena.ceiling,
            low_side: Side::Floor,
            high_side: Side::Ceiling,
            reposition: true,
        }
    }

    /// Left and right walls
    pub fn horizontal(arena: &Arena, mode: WallMode) -> Self {
        Self {
            axis: Axis::X,
            low: arena.left,
            high: arena.right,
            low_side: Side::Left,
            high_side: Side::Right,
            reposition: mode == WallMode::Reposition,
        }
    }
}

/// Boundaries touched by one ball in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub vertical: Option<Side>,
    pub horizontal: Option<Side>,
}

impl BoundaryHits {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = Side> {
        self.vertical.into_iter().chain(self.horizontal)
    }
}

/// Resolve penetration along one axis
///
/// The check is on the ball's center; the correction places the ball's
/// edge `epsilon` inside the boundary.
pub fn resolve_axis(ball: &mut Ball, bounds: &AxisBounds, epsilon: f32) -> Option<Side> {
    let i = bounds.axis.index();
    let p = ball.pos[i];

    let (side, corrected) = if p < bounds.low {
        (bounds.low_side, bounds.low + ball.radius + epsilon)
    } else if p > bounds.high {
        (bounds.high_side, bounds.high - ball.radius - epsilon)
    } else {
        return None;
    };

    bounce_on_axis(ball, bounds.axis, bounds.reposition.then_some(corrected));
    Some(side)
}

/// Flip one velocity component, optionally move the ball along that axis,
/// then damp the whole velocity
pub(crate) fn bounce_on_axis(ball: &mut Ball, axis: Axis, corrected: Option<f32>) {
    let i = axis.index();
    ball.vel[i] = -ball.vel[i];
    if let Some(p) = corrected {
        ball.pos[i] = p;
    }
    ball.vel *= ball.restitution;
}

/// Resolve all four boundaries for one ball (y axis, then x axis)
pub fn resolve_boundaries(ball: &mut Ball, config: &SimConfig) -> BoundaryHits {
    let eps = config.contact_epsilon;
    BoundaryHits {
        vertical: resolve_axis(ball, &AxisBounds::vertical(&config.arena), eps),
        horizontal: resolve_axis(
            ball,
            &AxisBounds::horizontal(&config.arena, config.wall_mode),
            eps,
        ),
    }
}

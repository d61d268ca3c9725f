//! Plinko Sim - a deterministic plinko board physics stepper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, integration, collisions, tick driver)
//! - `display`: Simulation-space to screen-space mapping for renderers
//! - `scoring`: Goal slots along the floor and landing scores
//! - `scenario`: Data-driven setup loaded from JSON
//! - `error`: Configuration and scenario errors

pub mod display;
pub mod error;
pub mod scenario;
pub mod scoring;
pub mod sim;

pub use display::ScreenTransform;
pub use error::{ConfigError, ScenarioError};
pub use scenario::Scenario;
pub use scoring::{GoalSlots, Scoreboard};

/// Board constants, in seconds and simulation units (meters)
pub mod consts {
    /// Arena width
    pub const SIM_WIDTH: f32 = 100.0;
    /// Arena aspect ratio (width : height), a tall vertical board
    pub const ASPECT_RATIO: (f32, f32) = (9.0, 16.0);
    /// Arena height derived from width and aspect ratio
    pub const SIM_HEIGHT: f32 = SIM_WIDTH / ASPECT_RATIO.0 * ASPECT_RATIO.1;

    /// Simulation rate (ticks per second)
    pub const SAMPLE_RATE: f32 = 128.0;
    /// Gravity magnitude (units/s²)
    pub const GRAVITY: f32 = 25.0 * 9.8;
    /// Fraction of velocity kept after one second of air drag
    pub const AIR_DAMPING_PER_SECOND: f32 = 0.9999;
    /// Speed ceiling (units/s)
    pub const MAX_VELOCITY: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 1.5;
    pub const BOUNCE_DAMPING: f32 = 0.9;

    /// Pin defaults
    pub const PIN_RADIUS: f32 = 1.5;
    pub const PIN_ROWS: u32 = 9;

    /// Goal slots along the floor (bumped to odd)
    pub const GOAL_COUNT: u32 = 10;
    /// Goal divider height as a fraction of the arena height
    pub const GOAL_ZONE_FRACTION: f32 = 0.05;
    /// Balls dropped onto the board by default
    pub const MAX_ACTIVE_BALLS: usize = 16;

    /// Gap left between a corrected body and the surface it touched
    pub const CONTACT_EPSILON: f32 = 0.01;
    /// Ball-pin center distance below which a contact has no usable normal
    pub const DEGENERATE_DISTANCE: f32 = 1e-6;
}

/// Convert a per-second rate into the per-tick value used by the stepper
#[inline]
pub fn per_tick(per_second: f32) -> f32 {
    per_second / consts::SAMPLE_RATE
}

/// Convert a per-second² acceleration into a per-tick velocity increment
#[inline]
pub fn per_tick_squared(per_second_sq: f32) -> f32 {
    per_second_sq / (consts::SAMPLE_RATE * consts::SAMPLE_RATE)
}

//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body index)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod collision;
pub mod config;
pub mod dividers;
pub mod grid;
pub mod integrator;
pub mod spawn;
pub mod state;
pub mod tick;

pub use boundary::{BoundaryHits, Side, resolve_boundaries};
pub use collision::{ContactTest, PinContact, PinHits, reflect_velocity, resolve_pin_collisions};
pub use config::{Arena, ClampMode, SimConfig, WallMode};
pub use dividers::{GoalDividers, resolve_dividers};
pub use grid::PinGrid;
pub use integrator::{clamp_velocity, integrate};
pub use spawn::SpawnPlan;
pub use state::{Ball, BodyStore, Pin};
pub use tick::{BallSnapshot, Contact, ContactEvent, Simulation, TickReport, tick};

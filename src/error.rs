//! Error types for simulation setup
//!
//! The stepper itself cannot fail once built; every error here is raised
//! while validating configuration or loading a scenario.

use thiserror::Error;

/// Which kind of body a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Ball,
    Pin,
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyKind::Ball => f.write_str("ball"),
            BodyKind::Pin => f.write_str("pin"),
        }
    }
}

/// Invalid simulation configuration, detected at setup time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{kind} {index} has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius {
        kind: BodyKind,
        index: usize,
        radius: f32,
    },

    #[error("ball {index} has restitution {value} outside [0, 1]")]
    RestitutionOutOfRange { index: usize, value: f32 },

    #[error("ball {index} has a non-finite position or velocity")]
    NonFiniteBall { index: usize },

    #[error("pin {index} has a non-finite position")]
    NonFinitePin { index: usize },

    #[error("air damping {0} outside [0, 1]")]
    AirDampingOutOfRange(f32),

    #[error("gravity {0} is not finite")]
    NonFiniteGravity(f32),

    #[error("max velocity {0} must be positive and finite")]
    InvalidMaxVelocity(f32),

    #[error("contact epsilon {0} must be non-negative and finite")]
    InvalidEpsilon(f32),

    #[error("arena has non-positive size: width {width}, height {height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("ball {index} with radius {radius} does not fit inside the arena")]
    BallDoesNotFit { index: usize, radius: f32 },

    #[error("pin grid spacing {spacing} / row spacing {row_spacing} must be positive")]
    InvalidGridSpacing { spacing: f32, row_spacing: f32 },

    #[error("pin grid of {rows}x{columns} is invalid: columns must be odd, both at most {max}")]
    InvalidGridSize { rows: u32, columns: u32, max: u32 },

    #[error("goal dividers with {slots} slots and height {height} are invalid (max {max} slots)")]
    InvalidDividers { slots: u32, height: f32, max: u32 },

    #[error("spawn plan needs a positive radius and restitution in [0, 1]")]
    InvalidSpawn,

    #[error("window size {width}x{height} must be positive")]
    InvalidWindow { width: f32, height: f32 },
}

/// Failure to load, save or build a scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

//! Data-driven simulation setup
//!
//! A scenario bundles the simulation context with its bodies: explicit
//! balls and pins, an optional generated pin grid and optional seeded ball
//! drops. Scenarios are plain JSON; only setup is read from disk, run state
//! is never written back.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ScenarioError;
use crate::scoring::GoalSlots;
use crate::sim::{
    Arena, Ball, BodyStore, GoalDividers, Pin, PinGrid, SimConfig, Simulation, SpawnPlan,
    WallMode,
};

/// Everything needed to start a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub config: SimConfig,
    pub balls: Vec<Ball>,
    pub pins: Vec<Pin>,
    /// Generated pins, appended after `pins`
    pub pin_grid: Option<PinGrid>,
    /// Generated balls, appended after `balls`
    pub spawn: Option<SpawnPlan>,
    /// Goal slots along the floor (bumped to odd); goal dividers, when
    /// configured, override it
    pub goal_count: u32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            balls: Vec::new(),
            pins: Vec::new(),
            pin_grid: None,
            spawn: None,
            goal_count: GOAL_COUNT,
        }
    }
}

impl Scenario {
    /// One ball thrown sideways in a narrow box, no pins
    pub fn classic() -> Self {
        let ball = Ball::new(Vec2::new(0.0, 10.0), 0.5, 0.8)
            .with_velocity(Vec2::new(1.0, 0.0));
        Self {
            config: SimConfig {
                gravity: -0.098,
                air_damping: 0.99,
                max_velocity: 300.0,
                arena: Arena::new(-10.0, 10.0, 0.0, 100.0),
                loop_threshold: 100,
                contact_epsilon: CONTACT_EPSILON,
                wall_mode: WallMode::ReflectOnly,
                ..Default::default()
            },
            balls: vec![ball],
            goal_count: 3,
            ..Default::default()
        }
    }

    /// The full board: tall arena, staggered pins, goal dividers, `balls`
    /// seeded drops
    pub fn board(seed: u64, balls: usize) -> Self {
        let mut config = SimConfig::default();
        config.goal_dividers = Some(GoalDividers::new(&config.arena, GOAL_COUNT));
        let pin_grid = PinGrid::centered(&config.arena, PIN_ROWS, BALL_RADIUS, PIN_RADIUS);
        Self {
            config,
            pin_grid: Some(pin_grid),
            spawn: Some(SpawnPlan::new(balls, seed)),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scenario = Self::from_json_str(&json)?;
        log::info!("Loaded scenario from {}", path.display());
        Ok(scenario)
    }

    /// Write the scenario as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScenarioError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?)?;
        log::info!("Scenario saved to {}", path.display());
        Ok(())
    }

    /// All bodies: explicit ones first, then generated ones
    ///
    /// Generation reads the arena, so the config is checked first.
    pub fn bodies(&self) -> Result<BodyStore, ScenarioError> {
        self.config.validate()?;
        let mut store = BodyStore::new(self.balls.clone(), self.pins.clone());

        if let Some(grid) = &self.pin_grid {
            grid.validate()?;
            for pin in grid.generate(&self.config.arena) {
                store.add_pin(pin);
            }
        }
        if let Some(plan) = &self.spawn {
            plan.validate()?;
            for ball in plan.spawn(&self.config.arena) {
                store.add_ball(ball);
            }
        }

        Ok(store)
    }

    /// Validate and build a ready-to-run simulation
    pub fn build(&self) -> Result<Simulation, ScenarioError> {
        Ok(Simulation::new(self.config.clone(), self.bodies()?)?)
    }

    /// Scoring slots, lined up with the dividers when there are any
    pub fn goal_slots(&self) -> GoalSlots {
        let count = self
            .config
            .goal_dividers
            .map_or(self.goal_count, |d| d.slots);
        GoalSlots::new(&self.config.arena, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_classic_run() {
        let mut sim = Scenario::classic().build().unwrap();
        let mut last = None;
        let ran = sim.run(|r| last = Some(r.clone()));

        assert_eq!(ran, 100);
        let last = last.unwrap();
        assert_eq!(last.tick, 100);
        let ball = last.balls[0];
        assert!(ball.pos.y >= 0.0 && ball.pos.y <= 100.0);
    }

    #[test]
    fn test_board_builds_pins_and_balls() {
        let scenario = Scenario::board(7, 16);
        let sim = scenario.build().unwrap();

        assert_eq!(sim.store().balls().len(), 16);
        assert_eq!(sim.store().pins().len(), 103);
        assert_eq!(scenario.goal_slots().count(), 11);
    }

    #[test]
    fn test_board_slots_follow_dividers() {
        let mut scenario = Scenario::board(1, 1);
        let dividers = scenario.config.goal_dividers.unwrap();
        assert!((dividers.height - SIM_HEIGHT * GOAL_ZONE_FRACTION).abs() < 1e-4);

        scenario.config.goal_dividers = Some(GoalDividers {
            slots: 7,
            ..dividers
        });
        assert_eq!(scenario.goal_slots().count(), 7);

        let slots = scenario.goal_slots();
        let dividers = scenario.config.goal_dividers.unwrap();
        for (i, x) in dividers.positions(&scenario.config.arena) {
            assert!((slots.left + i as f32 * slots.slot_width() - x).abs() < 1e-3);
        }
    }

    #[test]
    fn test_board_runs_are_repeatable() {
        let run = |seed| {
            let mut sim = Scenario::board(seed, 8).build().unwrap();
            for _ in 0..600 {
                sim.step();
            }
            sim.store().balls().to_vec()
        };

        assert_eq!(run(3), run(3));
    }

    #[test]
    fn test_partial_json_scenario() {
        let json = r#"{
            "config": { "gravity": -0.05, "loop_threshold": 10 },
            "balls": [ { "pos": [50.0, 150.0], "vel": [0.5, 0.0] } ],
            "pins": [ { "pos": [50.0, 100.0], "radius": 2.0 } ]
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();

        assert_eq!(scenario.config.loop_threshold, 10);
        assert_eq!(scenario.goal_count, GOAL_COUNT);
        assert!(scenario.pin_grid.is_none());

        let mut sim = scenario.build().unwrap();
        assert_eq!(sim.run(|_| {}), 10);
    }

    #[test]
    fn test_invalid_scenario_reports_config_error() {
        let json = r#"{ "balls": [ { "pos": [50.0, 150.0], "restitution": 1.5 } ] }"#;
        let err = Scenario::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Config(ConfigError::RestitutionOutOfRange { index: 0, .. })
        ));

        assert!(matches!(
            Scenario::from_json_str("{ not json"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn test_overflowing_arena_rejected_before_spawning() {
        let json = r#"{
            "config": {
                "arena": { "left": -3e38, "right": 3e38, "floor": 0.0, "ceiling": 100.0 }
            },
            "spawn": { "count": 1 }
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();

        assert!(matches!(
            scenario.bodies(),
            Err(ScenarioError::Config(ConfigError::InvalidArena { .. }))
        ));
        assert!(matches!(
            scenario.build(),
            Err(ScenarioError::Config(ConfigError::InvalidArena { .. }))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("plinko-sim-{}.json", std::process::id()));
        let scenario = Scenario::board(11, 4);

        scenario.save(&path).unwrap();
        let loaded = Scenario::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, scenario);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Scenario::load("/definitely/not/here.json"),
            Err(ScenarioError::Io(_))
        ));
    }
}

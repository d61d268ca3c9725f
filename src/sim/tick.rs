//! Fixed timestep simulation tick
//!
//! Core loop that advances the board deterministically. Each tick runs three
//! passes over the balls in index order: integrate, boundaries, pins. Boards
//! with goal dividers get a fourth pass after the pins.

use glam::Vec2;
use serde::Serialize;

use super::boundary::{Side, resolve_boundaries};
use super::collision::resolve_pin_collisions;
use super::config::SimConfig;
use super::dividers::resolve_dividers;
use super::integrator::integrate;
use super::state::BodyStore;
use crate::error::ConfigError;

/// What a ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contact {
    Boundary { side: Side },
    Pin { pin: usize },
    /// Divider `i` stands between goal slots `i - 1` and `i`
    Divider { divider: u32 },
}

/// A resolved collision, for renderers and scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactEvent {
    pub ball: usize,
    pub contact: Contact,
}

/// Post-tick state of one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub index: usize,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Everything a tick produced
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    pub balls: Vec<BallSnapshot>,
    pub contacts: Vec<ContactEvent>,
}

impl TickReport {
    /// Contacts involving one ball
    pub fn contacts_for(&self, ball: usize) -> impl Iterator<Item = &Contact> {
        self.contacts
            .iter()
            .filter(move |c| c.ball == ball)
            .map(|c| &c.contact)
    }
}

/// Advance every ball by one tick
pub fn tick(store: &mut BodyStore, config: &SimConfig, tick_number: u64) -> TickReport {
    let (balls, pins) = store.split_mut();
    let mut contacts = Vec::new();

    for ball in balls.iter_mut() {
        integrate(ball, config);
    }

    for (index, ball) in balls.iter_mut().enumerate() {
        for side in resolve_boundaries(ball, config).iter() {
            log::debug!("tick {}: ball {} hit {:?}", tick_number, index, side);
            contacts.push(ContactEvent {
                ball: index,
                contact: Contact::Boundary { side },
            });
        }
    }

    for (index, ball) in balls.iter_mut().enumerate() {
        let hits = resolve_pin_collisions(ball, pins, config.contact_epsilon);
        for pin in hits.resolved {
            log::debug!("tick {}: ball {} hit pin {}", tick_number, index, pin);
            contacts.push(ContactEvent {
                ball: index,
                contact: Contact::Pin { pin },
            });
        }
        for pin in hits.degenerate {
            log::warn!(
                "tick {}: ball {} is centered on pin {}, skipping contact",
                tick_number,
                index,
                pin
            );
        }
    }

    if let Some(dividers) = &config.goal_dividers {
        for (index, ball) in balls.iter_mut().enumerate() {
            let hits = resolve_dividers(ball, dividers, &config.arena, config.contact_epsilon);
            for divider in hits {
                log::debug!("tick {}: ball {} hit divider {}", tick_number, index, divider);
                contacts.push(ContactEvent {
                    ball: index,
                    contact: Contact::Divider { divider },
                });
            }
        }
    }

    let balls = balls
        .iter()
        .enumerate()
        .map(|(index, b)| BallSnapshot {
            index,
            pos: b.pos,
            vel: b.vel,
        })
        .collect();

    TickReport {
        tick: tick_number,
        balls,
        contacts,
    }
}

/// A validated run: owns the context and the bodies
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    store: BodyStore,
    ticks: u64,
}

impl Simulation {
    /// Validate configuration and bodies, failing fast on bad input
    pub fn new(config: SimConfig, store: BodyStore) -> Result<Self, ConfigError> {
        config.validate()?;
        store.validate(&config.arena, config.contact_epsilon)?;

        log::info!(
            "Simulation ready: {} balls, {} pins, {} ticks",
            store.balls().len(),
            store.pins().len(),
            config.loop_threshold
        );

        Ok(Self {
            config,
            store,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.ticks >= self.config.loop_threshold
    }

    /// Run a single tick, regardless of the loop threshold
    pub fn step(&mut self) -> TickReport {
        self.ticks += 1;
        tick(&mut self.store, &self.config, self.ticks)
    }

    /// Run until the loop threshold, handing each report to `observer`
    pub fn run<F>(&mut self, mut observer: F) -> u64
    where
        F: FnMut(&TickReport),
    {
        let start = self.ticks;
        while !self.is_finished() {
            let report = self.step();
            observer(&report);
        }
        log::info!("Run finished after {} ticks", self.ticks);
        self.ticks - start
    }
}

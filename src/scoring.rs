//! Goal slots along the floor
//!
//! The floor is split into an odd number of equal slots. The center slot
//! pays the most and payouts fall off by a factor of ten every five slots.
//! Balls score once, on their first floor contact; they keep bouncing
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::sim::{Arena, Contact, Side, TickReport};

/// Points paid by the center slot
pub const CENTER_POINTS: f64 = 1000.0;

/// Equal-width goal slots between the side walls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSlots {
    pub left: f32,
    pub right: f32,
    /// Always odd
    count: u32,
}

impl GoalSlots {
    /// `count` is bumped to the next odd number (and is at least 1)
    pub fn new(arena: &Arena, count: u32) -> Self {
        let count = if count % 2 == 0 { count + 1 } else { count };
        Self {
            left: arena.left,
            right: arena.right,
            count,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn slot_width(&self) -> f32 {
        (self.right - self.left) / self.count as f32
    }

    pub fn center(&self) -> u32 {
        self.count / 2
    }

    /// Slot under `x`, clamped to the outermost slots
    pub fn slot_index(&self, x: f32) -> u32 {
        let raw = ((x - self.left) / self.slot_width()).floor();
        raw.clamp(0.0, (self.count - 1) as f32) as u32
    }

    /// Payout of a slot
    pub fn points(&self, slot: u32) -> u64 {
        let distance = slot.abs_diff(self.center());
        (CENTER_POINTS / 10f64.powf(distance as f64 / 5.0)).round() as u64
    }
}

/// A ball that reached the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Landing {
    pub ball: usize,
    pub tick: u64,
    pub slot: u32,
    pub points: u64,
}

/// Running score over a simulation
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scoreboard {
    pub total: u64,
    pub landings: Vec<Landing>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_landed(&self, ball: usize) -> bool {
        self.landings.iter().any(|l| l.ball == ball)
    }

    /// Score every first floor contact in a tick report
    pub fn record(&mut self, slots: &GoalSlots, report: &TickReport) -> Vec<Landing> {
        let mut new = Vec::new();

        for event in &report.contacts {
            if event.contact != (Contact::Boundary { side: Side::Floor }) {
                continue;
            }
            if self.has_landed(event.ball) || new.iter().any(|l: &Landing| l.ball == event.ball) {
                continue;
            }
            let Some(snapshot) = report.balls.get(event.ball) else {
                continue;
            };

            let slot = slots.slot_index(snapshot.pos.x);
            let points = slots.points(slot);
            log::info!(
                "Ball {} landed in slot {} for {} points (tick {})",
                event.ball,
                slot,
                points,
                report.tick
            );
            new.push(Landing {
                ball: event.ball,
                tick: report.tick,
                slot,
                points,
            });
        }

        self.total += new.iter().map(|l| l.points).sum::<u64>();
        self.landings.extend_from_slice(&new);
        new
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BallSnapshot, ContactEvent};
    use glam::Vec2;

    fn slots() -> GoalSlots {
        GoalSlots::new(&Arena::new(0.0, 110.0, 0.0, 200.0), 10)
    }

    fn floor_report(tick: u64, xs: &[f32]) -> TickReport {
        TickReport {
            tick,
            balls: xs
                .iter()
                .enumerate()
                .map(|(index, &x)| BallSnapshot {
                    index,
                    pos: Vec2::new(x, 2.0),
                    vel: Vec2::ZERO,
                })
                .collect(),
            contacts: (0..xs.len())
                .map(|ball| ContactEvent {
                    ball,
                    contact: Contact::Boundary { side: Side::Floor },
                })
                .collect(),
        }
    }

    #[test]
    fn test_even_count_bumped_to_odd() {
        let slots = slots();
        assert_eq!(slots.count(), 11);
        assert_eq!(slots.center(), 5);
        assert!((slots.slot_width() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_slot_index_clamped() {
        let slots = slots();
        assert_eq!(slots.slot_index(-5.0), 0);
        assert_eq!(slots.slot_index(0.0), 0);
        assert_eq!(slots.slot_index(55.0), 5);
        assert_eq!(slots.slot_index(109.9), 10);
        assert_eq!(slots.slot_index(500.0), 10);
    }

    #[test]
    fn test_points_fall_off() {
        let slots = slots();
        assert_eq!(slots.points(5), 1000);
        assert_eq!(slots.points(4), 631);
        assert_eq!(slots.points(6), 631);
        assert_eq!(slots.points(0), 100);
        assert_eq!(slots.points(10), 100);
    }

    #[test]
    fn test_each_ball_scores_once() {
        let slots = slots();
        let mut board = Scoreboard::new();

        let first = board.record(&slots, &floor_report(10, &[55.0, 5.0]));
        assert_eq!(first.len(), 2);
        assert_eq!(board.total, 1100);

        let again = board.record(&slots, &floor_report(11, &[55.0, 5.0]));
        assert!(again.is_empty());
        assert_eq!(board.total, 1100);
        assert!(board.has_landed(1));
    }

    #[test]
    fn test_other_contacts_ignored() {
        let slots = slots();
        let mut board = Scoreboard::new();
        let mut report = floor_report(3, &[55.0]);
        report.contacts[0].contact = Contact::Boundary {
            side: Side::Ceiling,
        };

        assert!(board.record(&slots, &report).is_empty());
        assert_eq!(board.total, 0);
    }
}

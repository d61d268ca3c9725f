//! Ball-pin collision detection and response
//!
//! Circle-circle test, reflection about the contact normal, then the ball is
//! pushed out onto the pin's surface along that normal.

use glam::Vec2;

use super::state::{Ball, Pin};
use crate::consts::DEGENERATE_DISTANCE;

/// Result of a ball-pin overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinContact {
    /// Unit normal from the pin center toward the ball center
    pub normal: Vec2,
    /// Center-to-center distance
    pub distance: f32,
    /// Overlap depth (sum of radii minus distance)
    pub penetration: f32,
}

/// Outcome of testing one pin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactTest {
    Miss,
    Hit(PinContact),
    /// Overlapping with coincident centers; there is no usable normal
    Degenerate,
}

/// Test a ball against a pin
pub fn ball_pin_contact(ball_pos: Vec2, ball_radius: f32, pin: &Pin) -> ContactTest {
    let delta = ball_pos - pin.pos;
    let distance = delta.length();
    let reach = ball_radius + pin.radius;

    if distance >= reach {
        return ContactTest::Miss;
    }
    if distance < DEGENERATE_DISTANCE {
        return ContactTest::Degenerate;
    }

    ContactTest::Hit(PinContact {
        normal: delta / distance,
        distance,
        penetration: reach - distance,
    })
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Apply the response for one contact: reflect, damp, push out
pub fn resolve_pin_contact(ball: &mut Ball, pin: &Pin, contact: &PinContact, epsilon: f32) {
    ball.vel = reflect_velocity(ball.vel, contact.normal) * ball.restitution;
    ball.pos = pin.pos + contact.normal * (pin.radius + ball.radius + epsilon);
}

/// Pins touched by one ball in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinHits {
    /// Indices of pins that were resolved, in pin order
    pub resolved: Vec<usize>,
    /// Indices of pins skipped because the centers coincided
    pub degenerate: Vec<usize>,
}

/// Test and resolve one ball against every pin
///
/// Pins are visited in index order and each overlap is resolved once, using
/// the ball's state as left by the previous pin. There is no second pass, so
/// a ball wedged between two pins may end the tick still touching one.
pub fn resolve_pin_collisions(ball: &mut Ball, pins: &[Pin], epsilon: f32) -> PinHits {
    let mut hits = PinHits::default();

    for (index, pin) in pins.iter().enumerate() {
        match ball_pin_contact(ball.pos, ball.radius, pin) {
            ContactTest::Miss => {}
            ContactTest::Hit(contact) => {
                resolve_pin_contact(ball, pin, &contact, epsilon);
                hits.resolved.push(index);
            }
            ContactTest::Degenerate => hits.degenerate.push(index),
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_contact_miss_and_touching() {
        let pin = Pin::new(Vec2::ZERO, 0.5);
        assert_eq!(
            ball_pin_contact(Vec2::new(2.0, 0.0), 0.5, &pin),
            ContactTest::Miss
        );
        // Exactly touching is not an overlap
        assert_eq!(
            ball_pin_contact(Vec2::new(1.0, 0.0), 0.5, &pin),
            ContactTest::Miss
        );
    }

    #[test]
    fn test_contact_normal_points_at_ball() {
        let pin = Pin::new(Vec2::new(5.0, 5.0), 1.0);
        let ContactTest::Hit(contact) = ball_pin_contact(Vec2::new(5.6, 5.8), 0.5, &pin) else {
            panic!("expected a hit");
        };
        assert!((contact.normal - Vec2::new(0.6, 0.8)).length() < 1e-5);
        assert!((contact.distance - 1.0).abs() < 1e-5);
        assert!((contact.penetration - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_head_on_bounce_from_above() {
        let pin = Pin::new(Vec2::new(0.0, 10.0), 0.5);
        let mut ball = Ball::new(Vec2::new(0.0, 10.8), 0.5, 0.8)
            .with_velocity(Vec2::new(0.0, -5.0));

        let hits = resolve_pin_collisions(&mut ball, &[pin], 0.01);

        assert_eq!(hits.resolved, vec![0]);
        assert!(ball.vel.x.abs() < 1e-6);
        assert!((ball.vel.y - 4.0).abs() < 1e-5);
        assert!((ball.pos.y - 11.01).abs() < 1e-5);
        assert!(ball.pos.x.abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_contact_is_skipped() {
        let pin = Pin::new(Vec2::new(3.0, 3.0), 0.5);
        let before = Ball::new(Vec2::new(3.0, 3.0), 0.5, 0.8)
            .with_velocity(Vec2::new(1.0, -2.0));
        let mut ball = before;

        let hits = resolve_pin_collisions(&mut ball, &[pin], 0.01);

        assert!(hits.resolved.is_empty());
        assert_eq!(hits.degenerate, vec![0]);
        assert_eq!(ball, before);
    }

    #[test]
    fn test_glancing_hit_keeps_tangential_motion() {
        // Normal is +x, ball moving down and toward the pin
        let pin = Pin::new(Vec2::ZERO, 1.0);
        let mut ball = Ball::new(Vec2::new(1.5, 0.0), 1.0, 1.0)
            .with_velocity(Vec2::new(-2.0, -3.0));

        resolve_pin_collisions(&mut ball, &[pin], 0.0);

        assert!((ball.vel - Vec2::new(2.0, -3.0)).length() < 1e-5);
        assert!((ball.pos - Vec2::new(2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_pins_resolved_in_index_order() {
        // Second pin is only hit after the first pushed the ball into it
        let pins = [
            Pin::new(Vec2::new(0.0, 0.0), 1.0),
            Pin::new(Vec2::new(0.0, 2.8), 1.0),
        ];
        let mut ball = Ball::new(Vec2::new(0.0, 1.2), 0.5, 1.0)
            .with_velocity(Vec2::new(0.0, -1.0));
        assert_eq!(ball_pin_contact(ball.pos, ball.radius, &pins[1]), ContactTest::Miss);

        let hits = resolve_pin_collisions(&mut ball, &pins, 0.0);

        assert_eq!(hits.resolved, vec![0, 1]);
        assert!((ball.pos.y - 1.3).abs() < 1e-5);
        assert!((ball.vel.y - (-1.0)).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_pin_contact_never_adds_speed(
            angle in 0.0f32..std::f32::consts::TAU,
            depth in 0.01f32..0.9,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            restitution in 0.0f32..=1.0,
        ) {
            let pin = Pin::new(Vec2::new(10.0, 10.0), 1.0);
            let offset = Vec2::new(angle.cos(), angle.sin()) * (2.0 - depth);
            let mut ball = Ball::new(pin.pos + offset, 1.0, restitution)
                .with_velocity(Vec2::new(vx, vy));
            let before = ball.speed();

            let hits = resolve_pin_collisions(&mut ball, &[pin], 0.01);

            prop_assert_eq!(hits.resolved, vec![0]);
            prop_assert!(ball.speed() <= before * (1.0 + 1e-5) + 1e-5);
            prop_assert!((ball.pos - pin.pos).length() >= 2.0);
        }
    }
}

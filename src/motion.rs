//! Intent-driven horizontal movement layered on a kinematic body.
//!
//! Input code caches a target speed with [`Motion::move_towards`]; each
//! fixed step [`Motion::apply`] eases the body's horizontal velocity
//! toward it, with separate acceleration and deceleration rates and
//! reduced control while airborne. Runs before the resolver step so the
//! step sees the frame's intended velocity.

use crate::body::{Body, CollidedInfo};
use crate::math::{approx_eq, move_toward, sign};

/// Horizontal movement controller.
#[derive(Debug, Clone)]
pub struct Motion {
    /// Rate used when speeding up along the current heading.
    pub acceleration: f32,
    /// Rate used when slowing down or reversing.
    pub deceleration: f32,
    /// Multiplier applied to the easing rate while airborne.
    pub midair_drag_factor: f32,
    /// Multiplier applied to the target speed while airborne.
    pub midair_speed_factor: f32,
    target_speed: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            acceleration: 40.0,
            deceleration: 60.0,
            midair_drag_factor: 1.0,
            midair_speed_factor: 1.0,
            target_speed: 0.0,
        }
    }
}

impl Motion {
    pub fn new(acceleration: f32, deceleration: f32) -> Self {
        Self {
            acceleration,
            deceleration,
            ..Self::default()
        }
    }

    /// Cache the desired horizontal speed for the next [`Motion::apply`].
    /// Sign is the heading; zero stops.
    pub fn move_towards(&mut self, speed: f32) {
        self.target_speed = speed;
    }

    /// Current intended heading: -1, 0 or 1.
    pub fn toward(&self) -> f32 {
        sign(self.target_speed)
    }

    /// Ease the body's horizontal velocity toward the cached target.
    ///
    /// Accelerates when the body already moves along the intended
    /// heading and is below target speed; decelerates otherwise
    /// (stopping or reversing). `contacts` is the previous step's
    /// summary; without a bottom contact the midair factors apply.
    pub fn apply(&self, body: &mut Body, contacts: &CollidedInfo, dt: f32) {
        let speed_dir = sign(body.velocity.x);
        let accelerating =
            speed_dir == self.toward() && !approx_eq(self.target_speed, body.velocity.x);
        let mut rate = if accelerating {
            self.acceleration
        } else {
            self.deceleration
        };

        let mut target = self.target_speed;
        if !contacts.is_grounded() {
            target *= self.midair_speed_factor;
            rate *= self.midair_drag_factor;
        }

        body.velocity.x = move_toward(body.velocity.x, target, rate * dt);
    }

    /// Launch vertically at `speed`, replacing any vertical velocity.
    pub fn jump(&self, body: &mut Body, speed: f32) {
        body.velocity.y = speed;
    }

    /// Launch with exactly the speed needed to reach `height` above the
    /// current position under constant gravity `gravity_y` (negative for
    /// downward pull).
    pub fn jump_to_height(&self, body: &mut Body, gravity_y: f32, height: f32) {
        let speed = (-2.0 * gravity_y * height).max(0.0).sqrt();
        self.jump(body, speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{AxisContact, CollisionDirection};
    use crate::query::SurfaceId;
    use glam::Vec2;

    fn grounded() -> CollidedInfo {
        CollidedInfo {
            x: None,
            y: Some(AxisContact {
                direction: CollisionDirection::Negative,
                surface: SurfaceId(0),
                point: Vec2::ZERO,
            }),
        }
    }

    #[test]
    fn test_accelerates_toward_target() {
        let mut motion = Motion::new(10.0, 20.0);
        motion.move_towards(5.0);

        let mut body = Body::new(Vec2::ZERO, Vec2::splat(0.5));
        body.velocity.x = 1.0;

        motion.apply(&mut body, &grounded(), 0.1);
        assert!((body.velocity.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_decelerates_when_reversing() {
        let mut motion = Motion::new(10.0, 20.0);
        motion.move_towards(-5.0);

        let mut body = Body::new(Vec2::ZERO, Vec2::splat(0.5));
        body.velocity.x = 1.0;

        // Heading opposes the velocity, so the deceleration rate applies.
        motion.apply(&mut body, &grounded(), 0.1);
        assert!((body.velocity.x - (-1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_stops_without_overshoot() {
        let mut motion = Motion::new(10.0, 20.0);
        motion.move_towards(0.0);

        let mut body = Body::new(Vec2::ZERO, Vec2::splat(0.5));
        body.velocity.x = 1.0;

        motion.apply(&mut body, &grounded(), 1.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_midair_factors() {
        let mut motion = Motion::new(10.0, 20.0);
        motion.midair_speed_factor = 0.5;
        motion.midair_drag_factor = 0.1;
        motion.move_towards(8.0);

        let mut body = Body::new(Vec2::ZERO, Vec2::splat(0.5));
        body.velocity.x = 1.0;

        // Airborne: target halves and the rate is scaled down.
        motion.apply(&mut body, &CollidedInfo::default(), 0.1);
        assert!((body.velocity.x - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_jump_to_height_reaches_height() {
        let motion = Motion::default();
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(0.5));

        let gravity_y = -9.81;
        motion.jump_to_height(&mut body, gravity_y, 2.0);

        // v^2 = -2 g h  =>  peak = v^2 / (-2 g) = h.
        let peak = body.velocity.y * body.velocity.y / (-2.0 * gravity_y);
        assert!((peak - 2.0).abs() < 1e-4);
        assert!(body.velocity.y > 0.0);
    }

    #[test]
    fn test_jump_keeps_horizontal_velocity() {
        let motion = Motion::default();
        let mut body = Body::new(Vec2::ZERO, Vec2::splat(0.5));
        body.velocity = Vec2::new(3.0, -1.0);

        motion.jump(&mut body, 6.0);
        assert_eq!(body.velocity, Vec2::new(3.0, 6.0));
    }
}

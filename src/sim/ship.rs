//! The player's ship and the bullets it fires

use glam::Vec2;

use super::body::{Body, GameObject};
use crate::consts::*;
use crate::geometry::{Bounds, UP, angle_to, rotate_degrees, scale_to_length};

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Spaceship {
    pub body: Body,
    /// Unit facing vector
    pub direction: Vec2,
}

impl Spaceship {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, radius),
            direction: UP,
        }
    }

    /// Turn by one maneuverability step
    pub fn rotate(&mut self, clockwise: bool) {
        let sign = if clockwise { 1.0 } else { -1.0 };
        self.direction = rotate_degrees(self.direction, SHIP_MANEUVERABILITY * sign);
    }

    /// Thrust along the facing direction, capped at `SHIP_MAX_SPEED`
    pub fn accelerate(&mut self) {
        self.body.vel += self.direction * SHIP_ACCELERATION;
        if self.body.vel.length() > SHIP_MAX_SPEED {
            self.body.vel = scale_to_length(self.body.vel, SHIP_MAX_SPEED);
        }
    }

    /// Bleed off a fixed fraction of each velocity component.
    ///
    /// Components already at rest stay at rest; the others decay toward zero
    /// without crossing it, and land on exactly zero once the decrement
    /// underflows.
    pub fn decelerate(&mut self) {
        let vel = &mut self.body.vel;
        if *vel == Vec2::splat(SHIP_MIN_SPEED) {
            return;
        }
        vel.x = decay(vel.x);
        vel.y = decay(vel.y);
    }

    /// Fire a bullet from the ship's position. Muzzle velocity inherits the
    /// ship's own velocity.
    pub fn shoot(&self, bullet_radius: f32) -> Bullet {
        let vel = self.direction * BULLET_SPEED + self.body.vel;
        Bullet::new(self.body.pos, vel, bullet_radius)
    }

    /// Sprite rotation in degrees, clockwise on screen from "up"
    pub fn heading_degrees(&self) -> f32 {
        angle_to(UP, self.direction)
    }
}

/// One deceleration step for a single velocity component
fn decay(component: f32) -> f32 {
    let step = component * SHIP_DECELERATION;
    if step == 0.0 {
        SHIP_MIN_SPEED
    } else {
        component - step
    }
}

impl GameObject for Spaceship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// A bullet. Flies straight and is pruned once it leaves the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            body: Body::new(pos, vel, radius),
        }
    }
}

impl GameObject for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    // No wrap-around: off-screen bullets are removed instead
    fn advance(&mut self, _bounds: Bounds) {
        self.body.step_unbounded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ship() -> Spaceship {
        Spaceship::new(Vec2::new(400.0, 300.0), DEFAULT_SHIP_SPRITE / 2.0)
    }

    #[test]
    fn test_rotate_steps() {
        let mut s = ship();
        s.rotate(true);
        assert!((s.heading_degrees() - SHIP_MANEUVERABILITY).abs() < 1e-3);
        s.rotate(false);
        s.rotate(false);
        assert!((s.heading_degrees() + SHIP_MANEUVERABILITY).abs() < 1e-3);
        assert!((s.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_accelerate_caps_at_max_speed() {
        let mut s = ship();
        for _ in 0..200 {
            s.accelerate();
        }
        assert!((s.body.vel.length() - SHIP_MAX_SPEED).abs() < 1e-4);
        // Still pointing the way we thrust
        assert!(s.body.vel.normalize().dot(UP) > 0.999);
    }

    #[test]
    fn test_decelerate_keeps_zero_component() {
        let mut s = ship();
        s.body.vel = Vec2::new(0.0, 4.0);
        s.decelerate();
        assert_eq!(s.body.vel.x, 0.0);
        assert!((s.body.vel.y - 3.6).abs() < 1e-5);
    }

    #[test]
    fn test_decelerate_at_rest_is_noop() {
        let mut s = ship();
        s.decelerate();
        assert_eq!(s.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_decelerate_reaches_exact_rest() {
        let mut s = ship();
        s.body.vel = Vec2::new(3.0, 4.0);
        for _ in 0..5000 {
            s.decelerate();
        }
        assert_eq!(s.body.vel, Vec2::ZERO);

        // Smallest subnormal: the decrement underflows, so it snaps to rest
        s.body.vel = Vec2::new(f32::from_bits(1), -f32::from_bits(1));
        s.decelerate();
        assert_eq!(s.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_shoot_inherits_ship_velocity() {
        let mut s = ship();
        s.body.vel = Vec2::new(1.0, 0.0);
        let bullet = s.shoot(DEFAULT_BULLET_SPRITE / 2.0);
        assert_eq!(bullet.body.pos, s.body.pos);
        assert!((bullet.body.vel - Vec2::new(1.0, -BULLET_SPEED)).length() < 1e-5);
    }

    #[test]
    fn test_bullet_does_not_wrap() {
        let mut bullet = Bullet::new(Vec2::new(1.0, 1.0), Vec2::new(-3.0, 0.0), 4.0);
        bullet.advance(Bounds::arena());
        assert!(bullet.body.pos.x < 0.0);
        assert!(!Bounds::arena().contains(bullet.body.pos));
    }

    proptest! {
        #[test]
        fn accelerate_never_exceeds_max_speed(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            turns in proptest::collection::vec((any::<bool>(), 0u8..4), 1..60),
        ) {
            let mut s = ship();
            s.body.vel = Vec2::new(vx, vy);
            for (clockwise, rotations) in turns {
                for _ in 0..rotations {
                    s.rotate(clockwise);
                }
                s.accelerate();
                prop_assert!(s.body.vel.length() <= SHIP_MAX_SPEED + 1e-4);
            }
        }

        #[test]
        fn decelerate_converges_without_overshoot(vx in -5.0f32..5.0, vy in -5.0f32..5.0) {
            let mut s = ship();
            s.body.vel = Vec2::new(vx, vy);
            let sign = s.body.vel.signum();
            let mut last = s.body.vel.length();
            for _ in 0..2000 {
                let before = s.body.vel;
                s.decelerate();
                let after = s.body.vel;
                // Each moving component shrinks or lands on zero
                prop_assert!(after.x.abs() < before.x.abs() || after.x == 0.0);
                prop_assert!(after.y.abs() < before.y.abs() || after.y == 0.0);
                let speed = after.length();
                prop_assert!(speed <= last);
                // Never flips sign on either axis
                prop_assert!(after.x * sign.x >= 0.0);
                prop_assert!(after.y * sign.y >= 0.0);
                last = speed;
            }
            prop_assert_eq!(s.body.vel, Vec2::ZERO);
        }
    }
}

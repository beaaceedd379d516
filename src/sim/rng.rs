//! Random sampling used by spawning and asteroid break-up
//!
//! Every helper takes the generator explicitly so a seeded session replays
//! identically.

use glam::Vec2;
use rand::Rng;

use crate::geometry::{Bounds, rotate_degrees};

/// Random whole-pixel position inside the arena
pub fn random_position(rng: &mut impl Rng, bounds: Bounds) -> Vec2 {
    Vec2::new(
        rng.random_range(0..bounds.width as u32) as f32,
        rng.random_range(0..bounds.height as u32) as f32,
    )
}

/// Random velocity with an integer speed in `[min_speed, max_speed]` and an
/// integer heading in `[0, 360)` degrees
pub fn random_velocity(rng: &mut impl Rng, min_speed: u32, max_speed: u32) -> Vec2 {
    let speed = rng.random_range(min_speed..=max_speed) as f32;
    let angle = rng.random_range(0..360u32) as f32;
    rotate_degrees(Vec2::new(speed, 0.0), angle)
}

/// Spread modifier for reflected asteroids: one of 0.5, 0.6, 0.7, 0.8, 0.9
pub fn angle_modifier(rng: &mut impl Rng) -> f32 {
    rng.random_range(5..10u32) as f32 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_velocity_speed_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let speed = random_velocity(&mut rng, 1, 3).length();
            assert!((0.999..=3.001).contains(&speed), "speed {speed}");
            assert!((speed - speed.round()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_angle_modifier_values() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let m = angle_modifier(&mut rng);
            assert!((0.5..=0.9).contains(&m));
            assert!(((m * 10.0) - (m * 10.0).round()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_random_position_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bounds = Bounds::arena();
        for _ in 0..200 {
            assert!(bounds.contains(random_position(&mut rng, bounds)));
        }
    }
}

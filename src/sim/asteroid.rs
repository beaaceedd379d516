//! Asteroids and how they break apart
//!
//! Two break-up rules, picked by what destroyed the rock:
//! - `split`: shot by a bullet. Children fly off in random directions.
//! - `reflect`: rammed by the shielded ship. Children spray away from the
//!   impact at twice the ship's speed, mirrored left/right.
//!
//! Both return the children instead of inserting them anywhere; the session
//! merges them into its asteroid list after the collision pass.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, GameObject};
use super::rng::{angle_modifier, random_velocity};
use crate::consts::*;
use crate::geometry::{reflect, scale_to_length};

/// Asteroid size class. Each hit steps one class down; `Small` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidSize {
    /// Numeric size (1..=3)
    pub fn value(self) -> u32 {
        self as u32
    }

    /// Sprite scale relative to the full-size asteroid sprite
    pub fn scale(self) -> f32 {
        match self {
            AsteroidSize::Large => 1.0,
            AsteroidSize::Medium => 0.5,
            AsteroidSize::Small => 0.25,
        }
    }

    /// The size children are born with, if any
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Points for shooting it; smaller rocks are worth more
    pub fn points(self) -> u64 {
        ASTEROID_VALUE / self.value() as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
}

impl Asteroid {
    /// `base_radius` is the collision radius of a full-size asteroid
    pub fn new(pos: Vec2, vel: Vec2, size: AsteroidSize, base_radius: f32) -> Self {
        Self {
            body: Body::new(pos, vel, base_radius * size.scale()),
            size,
        }
    }

    /// Asteroid with a random drift velocity
    pub fn with_random_velocity(
        rng: &mut impl Rng,
        pos: Vec2,
        size: AsteroidSize,
        base_radius: f32,
    ) -> Self {
        let vel = random_velocity(rng, ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED);
        Self::new(pos, vel, size, base_radius)
    }

    /// Radius a full-size asteroid would have
    fn base_radius(&self) -> f32 {
        self.body.radius / self.size.scale()
    }

    /// Break apart after a bullet hit
    pub fn split(&self, rng: &mut impl Rng) -> Vec<Asteroid> {
        let Some(child_size) = self.size.smaller() else {
            return Vec::new();
        };
        let base_radius = self.base_radius();
        (0..ASTEROID_SPLITS_INTO)
            .map(|_| Asteroid::with_random_velocity(rng, self.body.pos, child_size, base_radius))
            .collect()
    }

    /// Break apart after being rammed by a ship moving at `impact`.
    ///
    /// Each child reflects the impact vector about a perturbed normal and is
    /// rescaled to `|impact| * REFLECT_ACC_FACTOR`. Even children use
    /// `(x - m, -y + m)`, odd children `(-x - m, -y + m)`, with a fresh
    /// modifier `m` per child.
    pub fn reflect(&self, impact: Vec2, rng: &mut impl Rng) -> Vec<Asteroid> {
        let Some(child_size) = self.size.smaller() else {
            return Vec::new();
        };
        let base_radius = self.base_radius();
        let speed = impact.length() * REFLECT_ACC_FACTOR;
        (0..ASTEROID_SPLITS_INTO)
            .map(|i| {
                let m = angle_modifier(rng);
                let normal = if i % 2 == 1 {
                    Vec2::new(-impact.x - m, -impact.y + m)
                } else {
                    Vec2::new(impact.x - m, -impact.y + m)
                };
                let vel = scale_to_length(reflect(impact, normal), speed);
                Asteroid::new(self.body.pos, vel, child_size, base_radius)
            })
            .collect()
    }
}

impl GameObject for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BASE: f32 = DEFAULT_ASTEROID_SPRITE / 2.0;

    fn rock(size: AsteroidSize) -> Asteroid {
        Asteroid::new(Vec2::new(200.0, 150.0), Vec2::new(1.0, 0.0), size, BASE)
    }

    #[test]
    fn test_radius_follows_size() {
        assert_eq!(rock(AsteroidSize::Large).body.radius, BASE);
        assert_eq!(rock(AsteroidSize::Medium).body.radius, BASE * 0.5);
        assert_eq!(rock(AsteroidSize::Small).body.radius, BASE * 0.25);
    }

    #[test]
    fn test_points() {
        assert_eq!(AsteroidSize::Large.points(), 33);
        assert_eq!(AsteroidSize::Medium.points(), 50);
        assert_eq!(AsteroidSize::Small.points(), 100);
    }

    #[test]
    fn test_split_large_yields_two_medium() {
        let mut rng = Pcg32::seed_from_u64(1);
        let parent = rock(AsteroidSize::Large);
        let children = parent.split(&mut rng);
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.size, AsteroidSize::Medium);
            assert_eq!(child.body.pos, parent.body.pos);
            assert_eq!(child.body.radius, BASE * 0.5);
            let speed = child.body.vel.length();
            assert!((0.999..=3.001).contains(&speed));
        }
    }

    #[test]
    fn test_split_small_yields_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(rock(AsteroidSize::Small).split(&mut rng).is_empty());
    }

    #[test]
    fn test_reflect_small_yields_nothing() {
        let mut rng = Pcg32::seed_from_u64(2);
        assert!(rock(AsteroidSize::Small).reflect(Vec2::new(3.0, 1.0), &mut rng).is_empty());
    }

    #[test]
    fn test_reflect_speed_is_double_impact() {
        let mut rng = Pcg32::seed_from_u64(2);
        for impact in [Vec2::new(3.0, 1.0), Vec2::new(-2.0, 4.0), Vec2::new(0.0, -5.0)] {
            let children = rock(AsteroidSize::Medium).reflect(impact, &mut rng);
            assert_eq!(children.len(), 2);
            for child in &children {
                assert_eq!(child.size, AsteroidSize::Small);
                assert!((child.body.vel.length() - impact.length() * 2.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_reflect_is_seed_deterministic() {
        let impact = Vec2::new(2.5, -1.5);
        let a = rock(AsteroidSize::Large).reflect(impact, &mut Pcg32::seed_from_u64(9));
        let b = rock(AsteroidSize::Large).reflect(impact, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reflect_children_follow_mirrored_normals() {
        let impact = Vec2::new(2.0, -1.0);
        let children = rock(AsteroidSize::Large).reflect(impact, &mut Pcg32::seed_from_u64(5));

        // Replay the same stream: one modifier per child, in child order
        let mut replay = Pcg32::seed_from_u64(5);
        let m0 = angle_modifier(&mut replay);
        let m1 = angle_modifier(&mut replay);
        let speed = impact.length() * REFLECT_ACC_FACTOR;
        let normals = [
            Vec2::new(impact.x - m0, -impact.y + m0),
            Vec2::new(-impact.x - m1, -impact.y + m1),
        ];

        assert_eq!(children.len(), 2);
        for (child, normal) in children.iter().zip(normals) {
            let want = scale_to_length(reflect(impact, normal), speed);
            assert!(
                (child.body.vel - want).length() < 1e-4,
                "got {:?}, want {:?}",
                child.body.vel,
                want
            );
        }
        assert!((children[0].body.vel - children[1].body.vel).length() > 1e-3);
    }
}

//! Shared kinematic state and the capability trait every game object implements

use glam::Vec2;

use crate::geometry::{Bounds, wrap_position};

/// Position, velocity and collision radius of a game object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self { pos, vel, radius }
    }

    /// Advance one frame and wrap around the arena edges
    pub fn step_wrapped(&mut self, bounds: Bounds) {
        self.pos = wrap_position(self.pos + self.vel, bounds);
    }

    /// Advance one frame without wrapping
    pub fn step_unbounded(&mut self) {
        self.pos += self.vel;
    }

    /// Circle-circle overlap; touching circles do not collide
    pub fn overlaps(&self, other: &Body) -> bool {
        super::collision::circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }
}

/// Behaviour shared by ships, asteroids, bullets and the shield
pub trait GameObject {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Per-frame motion. Wraps around the arena unless overridden.
    fn advance(&mut self, bounds: Bounds) {
        self.body_mut().step_wrapped(bounds);
    }

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    fn vel(&self) -> Vec2 {
        self.body().vel
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn collides_with(&self, other: &dyn GameObject) -> bool {
        self.body().overlaps(other.body())
    }
}

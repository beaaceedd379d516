//! Collision detection and response for circular bodies
//!
//! Everything in the arena collides as a circle, so detection is a single
//! distance test. Response lives with the entities (split, reflect, shield
//! damage); this module only answers "do they touch".

use glam::Vec2;

/// Check whether two circles overlap.
///
/// Strict inequality: circles that exactly touch are not colliding.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

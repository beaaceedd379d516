//! 2D vector helpers
//!
//! `glam::Vec2` covers add/subtract/scale/length/distance. The helpers here add
//! the degree-based rotation and reflection the game rules are written in, plus
//! toroidal wrap-around. Angles are in degrees; screen coordinates have +y
//! pointing down, so a positive rotation turns clockwise on screen.

use glam::Vec2;

/// Screen "up" - the ship's initial facing
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Width/height of the wrap-around arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The fixed play arena
    pub const fn arena() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Half-open containment: `0 <= x < width` and `0 <= y < height`
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x < self.width && pos.y >= 0.0 && pos.y < self.height
    }
}

/// Modulo that is never negative for a positive divisor
#[inline]
pub fn floor_mod(value: f32, modulus: f32) -> f32 {
    let r = value.rem_euclid(modulus);
    // rem_euclid can round up to exactly `modulus` for tiny negative inputs
    if r >= modulus { 0.0 } else { r }
}

/// Wrap a position into `[0, width) x [0, height)`, each axis independently
#[inline]
pub fn wrap_position(pos: Vec2, bounds: Bounds) -> Vec2 {
    Vec2::new(floor_mod(pos.x, bounds.width), floor_mod(pos.y, bounds.height))
}

/// Rotate by `degrees` (positive = clockwise on screen)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Signed angle in degrees that rotates `from` onto `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y.atan2(to.x) - from.y.atan2(from.x)).to_degrees()
}

/// Normalize, or the zero vector when the length is zero
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Reflect `v` about the surface whose normal is `normal`.
///
/// The normal does not need to be unit length. A zero normal leaves `v`
/// unchanged.
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    v - 2.0 * v.dot(n) * n
}

/// Rescale to `length`, keeping direction. Zero vectors stay zero.
#[inline]
pub fn scale_to_length(v: Vec2, length: f32) -> Vec2 {
    v.normalize_or_zero() * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_floor_mod_negative() {
        assert!((floor_mod(-10.0, 800.0) - 790.0).abs() < EPS);
        assert!((floor_mod(810.0, 800.0) - 10.0).abs() < EPS);
        assert_eq!(floor_mod(0.0, 800.0), 0.0);
        assert_eq!(floor_mod(800.0, 800.0), 0.0);
    }

    #[test]
    fn test_rotate_clockwise_on_screen() {
        // Up rotated 90 degrees clockwise points right
        let right = rotate_degrees(UP, 90.0);
        assert!((right - Vec2::new(1.0, 0.0)).length() < EPS);

        let left = rotate_degrees(UP, -90.0);
        assert!((left - Vec2::new(-1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_angle_to() {
        assert!((angle_to(UP, Vec2::new(1.0, 0.0)) - 90.0).abs() < EPS);
        assert!(angle_to(UP, UP).abs() < EPS);
    }

    #[test]
    fn test_reflect_unnormalized_normal() {
        let v = Vec2::new(3.0, 4.0);
        let r = reflect(v, Vec2::new(0.0, -10.0));
        assert!((r - Vec2::new(3.0, -4.0)).length() < EPS);
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(scale_to_length(Vec2::ZERO, 5.0), Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn wrap_lands_in_bounds(
            x in -1.0e5f32..1.0e5,
            y in -1.0e5f32..1.0e5,
            w in 1.0f32..2000.0,
            h in 1.0f32..2000.0,
        ) {
            let p = wrap_position(Vec2::new(x, y), Bounds::new(w, h));
            prop_assert!(p.x >= 0.0 && p.x < w);
            prop_assert!(p.y >= 0.0 && p.y < h);
        }

        #[test]
        fn wrap_is_noop_in_bounds(fx in 0.0f32..1.0, fy in 0.0f32..1.0) {
            let bounds = Bounds::arena();
            let pos = Vec2::new(fx * bounds.width, fy * bounds.height);
            prop_assume!(bounds.contains(pos));
            prop_assert_eq!(wrap_position(pos, bounds), pos);
        }

        #[test]
        fn rotation_preserves_length(x in -100.0f32..100.0, y in -100.0f32..100.0, deg in -720.0f32..720.0) {
            let v = Vec2::new(x, y);
            prop_assert!((rotate_degrees(v, deg).length() - v.length()).abs() < 1e-3);
        }
    }
}

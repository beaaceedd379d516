//! Space Rocks - a wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, combat, game state)
//! - `geometry`: Vector helpers and toroidal wrap-around
//! - `platform`: Renderer/input contracts plus headless and SDL2 backends
//! - `renderer`: Frame composition and HUD
//! - `game`: The outer frame loop tying input, simulation, audio and drawing together

pub mod audio;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (logical units, also the window size at scale 1)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Frame rate while running
    pub const TARGET_FPS: u32 = 60;
    /// Frame rate while paused (the pause counter advances once per frame)
    pub const PAUSED_FPS: u32 = 1;

    /// Ship handling
    pub const SHIP_MANEUVERABILITY: f32 = 3.0; // degrees per input tick
    pub const SHIP_ACCELERATION: f32 = 0.1;
    pub const SHIP_DECELERATION: f32 = 0.1; // fraction of velocity removed per call
    pub const SHIP_MIN_SPEED: f32 = 0.0;
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 3.0;

    /// Shield
    pub const SHIELD_MAX: u8 = 10;
    /// Frames the ring stays in the alert color after a hit
    pub const SHIELD_HIT_COOLDOWN: u8 = 6;
    /// Strength restored when the kill bonus is reached
    pub const SHIELD_REGEN: u8 = 1;
    /// Ring diameter in pixels
    pub const SHIELD_DIAMETER: f32 = 60.0;

    /// Asteroids
    pub const INITIAL_ASTEROIDS: usize = 6;
    pub const MIN_ASTEROID_DISTANCE: f32 = 250.0;
    pub const ASTEROID_SPLITS_INTO: usize = 2;
    pub const ASTEROID_MIN_SPEED: u32 = 1;
    pub const ASTEROID_MAX_SPEED: u32 = 3;
    /// Impact speed multiplier for asteroids reflected off the ship
    pub const REFLECT_ACC_FACTOR: f32 = 2.0;

    /// Scoring
    pub const ASTEROID_VALUE: u64 = 100;
    /// Consecutive kills without taking damage needed for a bonus
    pub const BONUS_KILLS: u32 = 10;
    pub const BONUS_VALUE: u64 = 1000;

    /// Default sprite widths, used when no sprites are loaded (tests, headless)
    pub const DEFAULT_SHIP_SPRITE: f32 = 48.0;
    pub const DEFAULT_ASTEROID_SPRITE: f32 = 96.0;
    pub const DEFAULT_BULLET_SPRITE: f32 = 8.0;
}

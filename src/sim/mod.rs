//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the entity lists)
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod body;
pub mod collision;
pub mod rng;
pub mod shield;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize};
pub use body::{Body, GameObject};
pub use collision::circles_overlap;
pub use shield::{Shield, ShieldRing};
pub use ship::{Bullet, Spaceship};
pub use state::{GameEvent, GamePhase, GameState, ObjectRef, Outcome, SpriteMetrics};
pub use tick::{TickInput, tick};

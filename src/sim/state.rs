//! Game state and core simulation types
//!
//! The session owns every entity, the score and the RNG. Nothing outside the
//! simulation mutates it; the presentation layer only reads.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, AsteroidSize};
use super::body::GameObject;
use super::rng::random_position;
use super::shield::Shield;
use super::ship::{Bullet, Spaceship};
use crate::consts::*;
use crate::geometry::Bounds;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Frozen; only the pause counter advances
    Paused,
    /// Won or lost. Entities keep drifting but nothing collides.
    Ended,
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Won => "You won!",
            Outcome::Lost => "You lost!",
        }
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LaserFired,
    AsteroidShot { size: AsteroidSize, points: u64 },
    ShieldHit { remaining: u8 },
    BonusAwarded { points: u64 },
    ShipDestroyed,
    Paused,
    Resumed,
    GameOver(Outcome),
}

/// Collision sizes measured from the loaded sprites (full sprite widths)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMetrics {
    pub ship: f32,
    pub asteroid: f32,
    pub bullet: f32,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            ship: DEFAULT_SHIP_SPRITE,
            asteroid: DEFAULT_ASTEROID_SPRITE,
            bullet: DEFAULT_BULLET_SPRITE,
        }
    }
}

impl SpriteMetrics {
    pub fn ship_radius(&self) -> f32 {
        self.ship / 2.0
    }

    /// Radius of a full-size asteroid
    pub fn asteroid_radius(&self) -> f32 {
        self.asteroid / 2.0
    }

    pub fn bullet_radius(&self) -> f32 {
        self.bullet / 2.0
    }
}

/// Read-only view of a live object, in draw order
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    Asteroid(&'a Asteroid),
    Bullet(&'a Bullet),
    Ship(&'a Spaceship),
    Shield(&'a Shield),
}

impl ObjectRef<'_> {
    pub fn as_game_object(&self) -> &dyn GameObject {
        match *self {
            ObjectRef::Asteroid(a) => a,
            ObjectRef::Bullet(b) => b,
            ObjectRef::Ship(s) => s,
            ObjectRef::Shield(s) => s,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub bounds: Bounds,
    pub metrics: SpriteMetrics,
    /// `None` once the ship has been destroyed
    pub ship: Option<Spaceship>,
    pub shield: Shield,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub score: u64,
    /// Kills since the ship last took a hit
    pub bonus_count: u32,
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    /// Frames spent in the current pause
    pub pause_frames: u32,
    /// Simulation tick counter (running frames only)
    pub time_ticks: u64,
    /// Events raised since the last `drain_events`
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session with default sprite sizes
    pub fn new(seed: u64) -> Self {
        Self::with_metrics(seed, SpriteMetrics::default())
    }

    /// New session: ship centred and stationary, six large asteroids placed
    /// away from it
    pub fn with_metrics(seed: u64, metrics: SpriteMetrics) -> Self {
        let mut state = Self::empty(seed, metrics);
        for _ in 0..INITIAL_ASTEROIDS {
            state.spawn_initial_asteroid();
        }
        log::debug!(
            "Session {} started with {} asteroids",
            seed,
            state.asteroids.len()
        );
        state
    }

    /// Session with a ship but no asteroids
    pub fn empty(seed: u64, metrics: SpriteMetrics) -> Self {
        let bounds = Bounds::arena();
        let ship = Spaceship::new(bounds.center(), metrics.ship_radius());
        let shield = Shield::new(&ship);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            metrics,
            ship: Some(ship),
            shield,
            asteroids: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            bonus_count: 0,
            phase: GamePhase::Running,
            outcome: None,
            pause_frames: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Large asteroid at a random spot farther than `MIN_ASTEROID_DISTANCE`
    /// from the ship
    fn spawn_initial_asteroid(&mut self) {
        let anchor = self
            .ship
            .as_ref()
            .map_or(self.bounds.center(), |ship| ship.body.pos);
        let pos = loop {
            let candidate = random_position(&mut self.rng, self.bounds);
            if candidate.distance(anchor) > MIN_ASTEROID_DISTANCE {
                break candidate;
            }
        };
        let asteroid = Asteroid::with_random_velocity(
            &mut self.rng,
            pos,
            AsteroidSize::Large,
            self.metrics.asteroid_radius(),
        );
        self.asteroids.push(asteroid);
    }

    /// Asteroid of the given size, using this session's sprite metrics
    pub fn make_asteroid(&self, pos: Vec2, vel: Vec2, size: AsteroidSize) -> Asteroid {
        Asteroid::new(pos, vel, size, self.metrics.asteroid_radius())
    }

    /// Bullet using this session's sprite metrics
    pub fn make_bullet(&self, pos: Vec2, vel: Vec2) -> Bullet {
        Bullet::new(pos, vel, self.metrics.bullet_radius())
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn end(&mut self, outcome: Outcome) {
        self.phase = GamePhase::Ended;
        self.outcome = Some(outcome);
        self.events.push(GameEvent::GameOver(outcome));
    }

    /// Primary HUD message (centre of the screen)
    pub fn message(&self) -> Option<&'static str> {
        match self.phase {
            GamePhase::Paused => Some("GAME PAUSED"),
            GamePhase::Ended => self.outcome.map(Outcome::message),
            GamePhase::Running => None,
        }
    }

    /// Secondary HUD message: the pause counter
    pub fn secondary_message(&self) -> Option<String> {
        (self.phase == GamePhase::Paused).then(|| self.pause_frames.to_string())
    }

    /// Live objects in draw order: asteroids, bullets, ship, shield.
    /// The shield is only present while the ship is.
    pub fn game_objects(&self) -> Vec<ObjectRef<'_>> {
        let mut objects: Vec<ObjectRef<'_>> = self
            .asteroids
            .iter()
            .map(ObjectRef::Asteroid)
            .chain(self.bullets.iter().map(ObjectRef::Bullet))
            .collect();
        if let Some(ship) = &self.ship {
            objects.push(ObjectRef::Ship(ship));
            objects.push(ObjectRef::Shield(&self.shield));
        }
        objects
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

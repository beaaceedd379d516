//! Per-frame simulation step
//!
//! Advances the session by one frame. The phase decides what happens:
//! - Running: controls, motion, collisions, scoring, win/loss checks
//! - Paused: only the pause counter advances
//! - Ended: entities keep drifting, nothing collides

use super::asteroid::Asteroid;
use super::body::GameObject;
use super::state::{GameEvent, GamePhase, GameState, Outcome};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn clockwise (takes priority over `rotate_left`)
    pub rotate_right: bool,
    /// Turn counter-clockwise
    pub rotate_left: bool,
    /// Accelerate along the facing direction
    pub thrust: bool,
    /// Slow down
    pub brake: bool,
    /// Fire one bullet
    pub fire: bool,
    /// Pause toggle
    pub toggle_pause: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.fire && state.is_running() {
        fire(state);
    }

    if input.toggle_pause {
        toggle_pause(state);
    }

    match state.phase {
        GamePhase::Paused => {
            state.pause_frames += 1;
        }
        GamePhase::Ended => {
            move_objects(state);
        }
        GamePhase::Running => {
            state.time_ticks += 1;
            apply_controls(state, input);
            move_objects(state);
            if let Some(ship) = &state.ship {
                state.shield.update(ship);
            }
            resolve_ship_collisions(state);
            resolve_bullet_hits(state);
            prune_bullets(state);
            award_bonus(state);
            check_victory(state);
        }
    }
}

fn fire(state: &mut GameState) {
    if let Some(ship) = &state.ship {
        let bullet = ship.shoot(state.metrics.bullet_radius());
        state.bullets.push(bullet);
        state.events.push(GameEvent::LaserFired);
    }
}

/// Flip between Running and Paused. Ignored once the game is over.
fn toggle_pause(state: &mut GameState) {
    if state.ship.is_none() {
        return;
    }
    match state.phase {
        GamePhase::Running => {
            state.phase = GamePhase::Paused;
            state.pause_frames = 0;
            state.events.push(GameEvent::Paused);
            log::info!("Paused game");
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Running;
            state.pause_frames = 0;
            state.events.push(GameEvent::Resumed);
            log::info!("Resumed game");
        }
        GamePhase::Ended => {}
    }
}

fn apply_controls(state: &mut GameState, input: &TickInput) {
    let Some(ship) = state.ship.as_mut() else {
        return;
    };
    if input.rotate_right {
        ship.rotate(true);
    } else if input.rotate_left {
        ship.rotate(false);
    }
    if input.thrust {
        ship.accelerate();
    }
    if input.brake {
        ship.decelerate();
    }
}

fn move_objects(state: &mut GameState) {
    let bounds = state.bounds;
    for asteroid in &mut state.asteroids {
        asteroid.advance(bounds);
    }
    for bullet in &mut state.bullets {
        bullet.advance(bounds);
    }
    if let Some(ship) = state.ship.as_mut() {
        ship.advance(bounds);
        state.shield.advance(bounds);
    }
}

/// Ship against every asteroid.
///
/// Works on a snapshot of the asteroid list: every asteroid is checked exactly
/// once, and children spawned by a reflect only join the field after the
/// pass.
fn resolve_ship_collisions(state: &mut GameState) {
    if state.ship.is_none() {
        return;
    }

    let snapshot = std::mem::take(&mut state.asteroids);
    let mut survivors = Vec::with_capacity(snapshot.len());
    let mut spawned: Vec<Asteroid> = Vec::new();

    for asteroid in snapshot {
        let Some(ship) = state.ship.as_mut() else {
            // Ship already destroyed earlier in this pass
            survivors.push(asteroid);
            continue;
        };
        if !asteroid.collides_with(&*ship) {
            survivors.push(asteroid);
            continue;
        }

        log::info!("Shields @ {}", state.shield.strength);
        state.bonus_count = 0;

        if state.shield.is_depleted() {
            state.ship = None;
            state.events.push(GameEvent::ShipDestroyed);
            state.end(Outcome::Lost);
            log::info!("Ship destroyed, final score {}", state.score);
            survivors.push(asteroid);
            continue;
        }

        // A stationary ship still pushes the debris away along its heading
        let impact = if ship.body.vel.length_squared() > f32::EPSILON {
            ship.body.vel
        } else {
            ship.direction
        };
        for _ in 0..asteroid.size.value() * 2 {
            ship.decelerate();
        }
        state.shield.decrease();
        state.events.push(GameEvent::ShieldHit {
            remaining: state.shield.strength,
        });
        spawned.extend(asteroid.reflect(impact, &mut state.rng));
    }

    survivors.extend(spawned);
    state.asteroids = survivors;
}

/// Bullets against asteroids. Each bullet destroys at most one asteroid.
fn resolve_bullet_hits(state: &mut GameState) {
    let bullets = std::mem::take(&mut state.bullets);
    let mut spawned: Vec<Asteroid> = Vec::new();

    for bullet in bullets {
        let hit = state
            .asteroids
            .iter()
            .position(|asteroid| asteroid.collides_with(&bullet));
        match hit {
            Some(index) => {
                let asteroid = state.asteroids.remove(index);
                let points = asteroid.size.points();
                state.score += points;
                state.bonus_count += 1;
                state.events.push(GameEvent::AsteroidShot {
                    size: asteroid.size,
                    points,
                });
                spawned.extend(asteroid.split(&mut state.rng));
            }
            None => state.bullets.push(bullet),
        }
    }

    state.asteroids.extend(spawned);
}

/// Drop bullets that have left the arena
fn prune_bullets(state: &mut GameState) {
    let bounds = state.bounds;
    let before = state.bullets.len();
    state.bullets.retain(|bullet| bounds.contains(bullet.body.pos));
    let pruned = before - state.bullets.len();
    if pruned > 0 {
        log::trace!("Pruned {} off-screen bullets", pruned);
    }
}

fn award_bonus(state: &mut GameState) {
    if state.bonus_count < BONUS_KILLS {
        return;
    }
    state.score += BONUS_VALUE;
    state.shield.increase(SHIELD_REGEN);
    state.bonus_count = 0;
    state.events.push(GameEvent::BonusAwarded {
        points: BONUS_VALUE,
    });
    log::info!(
        "Bonus! +{} (score {}, shields {})",
        BONUS_VALUE,
        state.score,
        state.shield.strength
    );
}

fn check_victory(state: &mut GameState) {
    if state.phase == GamePhase::Running && state.asteroids.is_empty() && state.ship.is_some() {
        state.end(Outcome::Won);
        log::info!("All asteroids cleared, final score {}", state.score);
    }
}

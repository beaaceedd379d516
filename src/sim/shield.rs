//! Ship shield
//!
//! The shield tracks the ship but never owns it: each frame the session
//! passes the ship's kinematics in through `update`. Its state is just
//! `strength` (0..=SHIELD_MAX) and `ticker`, the number of frames left in the
//! "recently hit" alert look.

use glam::Vec2;

use super::body::{Body, GameObject};
use super::ship::Spaceship;
use crate::consts::*;

/// How the presentation layer should draw the shield this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldRing {
    pub center: Vec2,
    pub radius: f32,
    /// Ring thickness in pixels (equals the shield strength)
    pub thickness: u8,
    /// Recently hit: draw in the alert color
    pub alert: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shield {
    pub body: Body,
    pub strength: u8,
    pub ticker: u8,
}

impl Shield {
    pub fn new(ship: &Spaceship) -> Self {
        Self {
            body: Body::new(ship.body.pos, ship.body.vel, SHIELD_DIAMETER / 2.0),
            strength: SHIELD_MAX,
            ticker: 0,
        }
    }

    /// Re-anchor to the ship and count down the hit cooldown
    pub fn update(&mut self, ship: &Spaceship) {
        self.body.pos = ship.body.pos;
        self.body.vel = ship.body.vel;
        self.ticker = self.ticker.saturating_sub(1);
    }

    /// Absorb one hit
    pub fn decrease(&mut self) {
        self.strength = self.strength.saturating_sub(1);
        self.ticker = SHIELD_HIT_COOLDOWN;
    }

    /// Restore strength, never beyond `SHIELD_MAX`
    pub fn increase(&mut self, amount: u8) {
        self.strength = self.strength.saturating_add(amount).min(SHIELD_MAX);
    }

    pub fn is_depleted(&self) -> bool {
        self.strength == 0
    }

    pub fn is_alert(&self) -> bool {
        self.ticker > 0
    }

    /// Ring to draw, or `None` once the shield is gone
    pub fn ring(&self) -> Option<ShieldRing> {
        if self.is_depleted() {
            return None;
        }
        Some(ShieldRing {
            center: self.body.pos,
            radius: self.body.radius,
            thickness: self.strength,
            alert: self.is_alert(),
        })
    }
}

impl GameObject for Shield {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

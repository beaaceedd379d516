//! Frame composition
//!
//! Draws one frame through any `Renderer` backend, in a fixed order:
//! background, asteroids, bullets, ship, shield, score, messages, present.

use std::path::Path;

use crate::audio::SoundEffect;
use crate::error::Result;
use crate::platform::{Color, HAlign, Renderer, SoundHandle, SpriteHandle, TextAnchor, VAlign};
use crate::sim::{GameState, ObjectRef, SpriteMetrics};

const SCORE_ANCHOR: TextAnchor = TextAnchor::new(VAlign::Top, HAlign::Right);
const FPS_ANCHOR: TextAnchor = TextAnchor::new(VAlign::Top, HAlign::Left);
const MESSAGE_ANCHOR: TextAnchor = TextAnchor::new(VAlign::Center, HAlign::Center);
const SECONDARY_ANCHOR: TextAnchor = TextAnchor::new(VAlign::Bottom, HAlign::Center);

/// Loaded sprites and sounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    pub background: SpriteHandle,
    pub ship: SpriteHandle,
    pub asteroid: SpriteHandle,
    pub bullet: SpriteHandle,
    /// One clip per `SoundEffect`, in `SoundEffect::ALL` order
    pub sounds: Vec<(SoundEffect, SoundHandle)>,
}

impl Assets {
    /// Load everything from `asset_dir/sprites/*.png` and
    /// `asset_dir/sounds/*.wav`. Any failure is fatal.
    pub fn load(renderer: &mut impl Renderer, asset_dir: &Path) -> Result<Self> {
        let sprite = |name: &str| asset_dir.join("sprites").join(format!("{name}.png"));
        let sound = |name: &str| asset_dir.join("sounds").join(format!("{name}.wav"));

        let background = renderer.load_sprite(&sprite("space"))?;
        let ship = renderer.load_sprite(&sprite("spaceship"))?;
        let asteroid = renderer.load_sprite(&sprite("asteroid"))?;
        let bullet = renderer.load_sprite(&sprite("bullet"))?;
        let mut sounds = Vec::with_capacity(SoundEffect::ALL.len());
        for effect in SoundEffect::ALL {
            sounds.push((effect, renderer.load_sound(&sound(effect.file_stem()))?));
        }

        let assets = Self {
            background,
            ship,
            asteroid,
            bullet,
            sounds,
        };
        log::info!("Assets loaded from {}", asset_dir.display());
        Ok(assets)
    }

    pub fn sound(&self, effect: SoundEffect) -> Option<SoundHandle> {
        self.sounds
            .iter()
            .find(|(e, _)| *e == effect)
            .map(|(_, sound)| *sound)
    }

    /// Collision sizes taken from the sprite widths
    pub fn metrics(&self, renderer: &impl Renderer) -> SpriteMetrics {
        let width = |sprite| {
            let (w, _) = renderer.sprite_size(sprite);
            w as f32
        };
        let defaults = SpriteMetrics::default();
        let or_default = |w: f32, fallback: f32| if w > 0.0 { w } else { fallback };
        SpriteMetrics {
            ship: or_default(width(self.ship), defaults.ship),
            asteroid: or_default(width(self.asteroid), defaults.asteroid),
            bullet: or_default(width(self.bullet), defaults.bullet),
        }
    }
}

/// Overlay that isn't part of the game state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hud {
    /// Measured frame rate, shown top-left when set
    pub fps: Option<f32>,
}

/// Draw and present one frame
pub fn draw_frame(
    renderer: &mut impl Renderer,
    state: &GameState,
    assets: &Assets,
    hud: &Hud,
) -> Result<()> {
    renderer.draw_background(assets.background)?;

    for object in state.game_objects() {
        match object {
            ObjectRef::Asteroid(asteroid) => {
                renderer.draw_sprite(assets.asteroid, asteroid.body.pos, 0.0, asteroid.size.scale())?
            }
            ObjectRef::Bullet(bullet) => {
                renderer.draw_sprite(assets.bullet, bullet.body.pos, 0.0, 1.0)?
            }
            ObjectRef::Ship(ship) => {
                renderer.draw_sprite(assets.ship, ship.body.pos, ship.heading_degrees(), 1.0)?
            }
            ObjectRef::Shield(shield) => {
                if let Some(ring) = shield.ring() {
                    let color = if ring.alert { Color::RED } else { Color::BLUE };
                    renderer.draw_ring(ring.center, ring.radius, ring.thickness, color)?;
                }
            }
        }
    }

    renderer.draw_text(&state.score.to_string(), SCORE_ANCHOR, Color::WHITE)?;
    if let Some(fps) = hud.fps {
        renderer.draw_text(&format!("FPS: {:.0}", fps), FPS_ANCHOR, Color::WHITE)?;
    }
    if let Some(message) = state.message() {
        renderer.draw_text(message, MESSAGE_ANCHOR, Color::TOMATO)?;
    }
    if let Some(secondary) = state.secondary_message() {
        renderer.draw_text(&secondary, SECONDARY_ANCHOR, Color::TOMATO)?;
    }

    renderer.present()
}

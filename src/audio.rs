//! Sound effects
//!
//! Clips are loaded by the platform; this module decides what to play for
//! each simulation event and at what volume.

use crate::platform::{Renderer, SoundHandle};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ship fires a bullet
    Laser,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 1] = [SoundEffect::Laser];

    /// File stem under `sounds/`
    pub fn file_stem(self) -> &'static str {
        match self {
            SoundEffect::Laser => "laser",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::LaserFired => Some(SoundEffect::Laser),
            _ => None,
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    sounds: Vec<(SoundEffect, SoundHandle)>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut audio = Self {
            sounds: Vec::new(),
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: settings.muted,
        };
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio
    }

    /// Attach a loaded clip to an effect
    pub fn register(&mut self, effect: SoundEffect, sound: SoundHandle) {
        self.sounds.retain(|(e, _)| *e != effect);
        self.sounds.push((effect, sound));
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// (master, sfx)
    pub fn volumes(&self) -> (f32, f32) {
        (self.master_volume, self.sfx_volume)
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, renderer: &mut impl Renderer, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some((_, sound)) = self.sounds.iter().find(|(e, _)| *e == effect) else {
            log::warn!("No clip registered for {:?}", effect);
            return;
        };
        renderer.play(*sound, vol);
    }

    /// Play whatever the frame's events call for
    pub fn handle_events(&self, renderer: &mut impl Renderer, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(renderer, effect);
        }
    }
}

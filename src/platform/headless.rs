//! Headless backend
//!
//! Draws nothing and plays nothing; every call is recorded so tests can
//! assert on what a frame would have shown. Input comes from a script of
//! frames. When the script runs out the backend reports `Quit`.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use glam::Vec2;

use super::{
    Color, HeldKeys, InputEvent, InputSource, Renderer, SoundHandle, SpriteHandle, TextAnchor,
};
use crate::error::{Error, Result};

/// Size reported for sprites without an explicit entry
const DEFAULT_SPRITE_SIZE: (u32, u32) = (32, 32);

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Background(SpriteHandle),
    Sprite {
        sprite: SpriteHandle,
        center: Vec2,
        rotation: f32,
        scale: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        thickness: u8,
        color: Color,
    },
    Text {
        text: String,
        anchor: TextAnchor,
        color: Color,
    },
    Present,
}

/// Input for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedFrame {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

impl ScriptedFrame {
    pub fn events(events: Vec<InputEvent>) -> Self {
        Self {
            events,
            held: HeldKeys::default(),
        }
    }

    pub fn held(held: HeldKeys) -> Self {
        Self {
            events: Vec::new(),
            held,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    /// Sprite sizes by file stem ("spaceship", "asteroid", ...)
    sizes: HashMap<String, (u32, u32)>,
    /// File stems that fail to load
    missing: Vec<String>,
    sprites: Vec<PathBuf>,
    sounds: Vec<PathBuf>,
    script: VecDeque<ScriptedFrame>,
    held: HeldKeys,
    /// Calls since the last `take_calls`
    pub calls: Vec<DrawCall>,
    /// Sounds played, with their volume
    pub played: Vec<(SoundHandle, f32)>,
    /// Frame rate requested by each `tick`
    pub ticks: Vec<u32>,
}

impl HeadlessFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `width` x `height` for the sprite named `stem`
    pub fn with_sprite_size(mut self, stem: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(stem.to_string(), (width, height));
        self
    }

    /// Make loading the asset named `stem` fail
    pub fn with_missing(mut self, stem: &str) -> Self {
        self.missing.push(stem.to_string());
        self
    }

    pub fn with_script(mut self, frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        self.script.extend(frames);
        self
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn sprite_path(&self, sprite: SpriteHandle) -> Option<&Path> {
        self.sprites.get(sprite.0).map(PathBuf::as_path)
    }

    pub fn sound_path(&self, sound: SoundHandle) -> Option<&Path> {
        self.sounds.get(sound.0).map(PathBuf::as_path)
    }

    fn check(&self, path: &Path) -> Result<String> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.missing.contains(&stem) {
            return Err(Error::Asset {
                path: path.to_path_buf(),
                reason: "not found".to_string(),
            });
        }
        Ok(stem)
    }
}

impl Renderer for HeadlessFrontend {
    fn load_sprite(&mut self, path: &Path) -> Result<SpriteHandle> {
        self.check(path)?;
        self.sprites.push(path.to_path_buf());
        Ok(SpriteHandle(self.sprites.len() - 1))
    }

    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle> {
        self.check(path)?;
        self.sounds.push(path.to_path_buf());
        Ok(SoundHandle(self.sounds.len() - 1))
    }

    fn sprite_size(&self, sprite: SpriteHandle) -> (u32, u32) {
        self.sprite_path(sprite)
            .and_then(Path::file_stem)
            .and_then(|stem| self.sizes.get(stem.to_string_lossy().as_ref()))
            .copied()
            .unwrap_or(DEFAULT_SPRITE_SIZE)
    }

    fn play(&mut self, sound: SoundHandle, volume: f32) {
        self.played.push((sound, volume));
    }

    fn draw_background(&mut self, sprite: SpriteHandle) -> Result<()> {
        self.calls.push(DrawCall::Background(sprite));
        Ok(())
    }

    fn draw_sprite(
        &mut self,
        sprite: SpriteHandle,
        center: Vec2,
        rotation_degrees: f32,
        scale: f32,
    ) -> Result<()> {
        self.calls.push(DrawCall::Sprite {
            sprite,
            center,
            rotation: rotation_degrees,
            scale,
        });
        Ok(())
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: u8, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Ring {
            center,
            radius,
            thickness,
            color,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> Result<()> {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            anchor,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }

    fn tick(&mut self, fps: u32) -> f32 {
        self.ticks.push(fps);
        1.0 / fps.max(1) as f32
    }
}

impl InputSource for HeadlessFrontend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.script.pop_front() {
            Some(frame) => {
                self.held = frame.held;
                frame.events
            }
            None => {
                self.held = HeldKeys::default();
                vec![InputEvent::Quit]
            }
        }
    }

    fn held_keys(&self) -> HeldKeys {
        self.held
    }
}

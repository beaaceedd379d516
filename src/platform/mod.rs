//! Platform abstraction layer
//!
//! The simulation never touches a window, a sound device or a keyboard. The
//! frame loop talks to the outside world through two narrow traits:
//! - `Renderer`: load assets, draw sprites/rings/text, play sounds, present
//!   and throttle the frame
//! - `InputSource`: discrete key events plus the set of held movement keys
//!
//! Backends:
//! - `headless`: records every call, replays scripted input (tests, CI)
//! - `sdl`: SDL2 window, textures and mixer (`sdl` feature)

use std::path::Path;

use glam::Vec2;

use crate::error::Result;

pub mod headless;
#[cfg(feature = "sdl")]
pub mod sdl;

pub use headless::{DrawCall, HeadlessFrontend, ScriptedFrame};

/// Opaque reference to a loaded sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub usize);

/// Opaque reference to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub usize);

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TOMATO: Color = Color::rgb(255, 99, 71);
    /// Shield ring, normal
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Shield ring, recently hit
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Where a line of text sits on the screen. The default is dead centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAnchor {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

impl TextAnchor {
    pub const fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Top-left corner of a `size` box placed on a `screen` sized target
    pub fn place(self, size: Vec2, screen: Vec2) -> Vec2 {
        let x = match self.horizontal {
            HAlign::Left => 0.0,
            HAlign::Center => (screen.x - size.x) / 2.0,
            HAlign::Right => screen.x - size.x,
        };
        let y = match self.vertical {
            VAlign::Top => 0.0,
            VAlign::Center => (screen.y - size.y) / 2.0,
            VAlign::Bottom => screen.y - size.y,
        };
        Vec2::new(x, y)
    }
}

/// Drawing, sound playback and frame pacing
pub trait Renderer {
    /// Load a sprite image. Failure is fatal at startup.
    fn load_sprite(&mut self, path: &Path) -> Result<SpriteHandle>;

    /// Load a sound clip. Failure is fatal at startup.
    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle>;

    /// Pixel size (width, height) of a loaded sprite
    fn sprite_size(&self, sprite: SpriteHandle) -> (u32, u32);

    /// Play a sound once at `volume` (0.0 - 1.0)
    fn play(&mut self, sound: SoundHandle, volume: f32);

    /// Stretch a sprite over the whole target
    fn draw_background(&mut self, sprite: SpriteHandle) -> Result<()>;

    /// Draw a sprite centred on `center`, rotated clockwise by
    /// `rotation_degrees` and scaled uniformly by `scale`
    fn draw_sprite(
        &mut self,
        sprite: SpriteHandle,
        center: Vec2,
        rotation_degrees: f32,
        scale: f32,
    ) -> Result<()>;

    /// Circle outline whose outer edge is `radius`, `thickness` pixels wide
    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: u8, color: Color) -> Result<()>;

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> Result<()>;

    /// Show the finished frame
    fn present(&mut self) -> Result<()>;

    /// Wait out the rest of the frame budget for `fps`. Returns the seconds
    /// elapsed since the previous call.
    fn tick(&mut self, fps: u32) -> f32;
}

/// Discrete input events the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Keys with a discrete meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    P,
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Keyboard/window input
pub trait InputSource {
    /// Events since the previous call, oldest first
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Held movement keys right now
    fn held_keys(&self) -> HeldKeys;
}

/// Everything the frame loop needs from a backend
pub trait Frontend: Renderer + InputSource {}

impl<T: Renderer + InputSource> Frontend for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_place() {
        let screen = Vec2::new(800.0, 600.0);
        let size = Vec2::new(100.0, 20.0);
        let top_right = TextAnchor::new(VAlign::Top, HAlign::Right);
        assert_eq!(top_right.place(size, screen), Vec2::new(700.0, 0.0));
        assert_eq!(TextAnchor::default().place(size, screen), Vec2::new(350.0, 290.0));
        let bottom = TextAnchor::new(VAlign::Bottom, HAlign::Center);
        assert_eq!(bottom.place(size, screen), Vec2::new(350.0, 580.0));
        let left = TextAnchor::new(VAlign::Center, HAlign::Left);
        assert_eq!(left.place(size, screen).x, 0.0);
    }
}

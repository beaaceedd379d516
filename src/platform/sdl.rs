//! SDL2 backend: window, textures, mixer and keyboard
//!
//! `SdlContext` owns the SDL subsystems. Textures borrow its texture
//! creator, so drawing happens through an `SdlFrontend` borrowed from the
//! context for the lifetime of the game loop.

use std::path::Path;
use std::time::{Duration, Instant};

use glam::Vec2;
use sdl2::event::Event;
use sdl2::image::{InitFlag, LoadTexture, Sdl2ImageContext};
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::mixer::{Channel, Chunk};
use sdl2::rect::{Point, Rect};
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{AudioSubsystem, EventPump, Sdl};

use super::{
    Color, HeldKeys, InputEvent, InputSource, Key, Renderer, SoundHandle, SpriteHandle, TextAnchor,
};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::{Error, Result};

/// Bitmap font pixel size (1 = 5x7 glyphs)
const TEXT_SCALE: u32 = 4;

/// Mixer channels, enough for rapid fire
const MIXER_CHANNELS: i32 = 16;

fn platform(err: impl ToString) -> Error {
    Error::Platform(err.to_string())
}

/// Owns the SDL subsystems for the life of the program
pub struct SdlContext {
    _sdl: Sdl,
    _image: Sdl2ImageContext,
    _audio: AudioSubsystem,
    canvas: Canvas<Window>,
    creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
}

impl SdlContext {
    /// Open an 800x600 logical window, scaled by `window_scale`
    pub fn new(title: &str, window_scale: u32) -> Result<Self> {
        let sdl = sdl2::init().map_err(platform)?;
        let video = sdl.video().map_err(platform)?;
        let image = sdl2::image::init(InitFlag::PNG).map_err(platform)?;
        let audio = sdl.audio().map_err(platform)?;
        sdl2::mixer::open_audio(
            sdl2::mixer::DEFAULT_FREQUENCY,
            sdl2::mixer::DEFAULT_FORMAT,
            sdl2::mixer::DEFAULT_CHANNELS,
            1024,
        )
        .map_err(platform)?;
        sdl2::mixer::allocate_channels(MIXER_CHANNELS);

        let width = ARENA_WIDTH as u32;
        let height = ARENA_HEIGHT as u32;
        let window = video
            .window(title, width * window_scale, height * window_scale)
            .position_centered()
            .build()
            .map_err(platform)?;
        let mut canvas = window.into_canvas().build().map_err(platform)?;
        canvas.set_logical_size(width, height).map_err(platform)?;
        let creator = canvas.texture_creator();
        let event_pump = sdl.event_pump().map_err(platform)?;

        log::info!(
            "SDL window {}x{} (scale {})",
            width * window_scale,
            height * window_scale,
            window_scale
        );

        Ok(Self {
            _sdl: sdl,
            _image: image,
            _audio: audio,
            canvas,
            creator,
            event_pump,
        })
    }

    pub fn frontend(&mut self) -> SdlFrontend<'_> {
        SdlFrontend {
            canvas: &mut self.canvas,
            creator: &self.creator,
            event_pump: &mut self.event_pump,
            textures: Vec::new(),
            chunks: Vec::new(),
            last_frame: Instant::now(),
        }
    }
}

impl Drop for SdlContext {
    fn drop(&mut self) {
        sdl2::mixer::close_audio();
    }
}

pub struct SdlFrontend<'a> {
    canvas: &'a mut Canvas<Window>,
    creator: &'a TextureCreator<WindowContext>,
    event_pump: &'a mut EventPump,
    textures: Vec<Texture<'a>>,
    chunks: Vec<Chunk>,
    last_frame: Instant,
}

fn lookup<'t, 'a>(textures: &'t [Texture<'a>], sprite: SpriteHandle) -> Result<&'t Texture<'a>> {
    textures
        .get(sprite.0)
        .ok_or_else(|| Error::Platform(format!("unknown sprite {}", sprite.0)))
}

impl Renderer for SdlFrontend<'_> {
    fn load_sprite(&mut self, path: &Path) -> Result<SpriteHandle> {
        let texture = self.creator.load_texture(path).map_err(|reason| Error::Asset {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!("Loaded sprite {}", path.display());
        self.textures.push(texture);
        Ok(SpriteHandle(self.textures.len() - 1))
    }

    fn load_sound(&mut self, path: &Path) -> Result<SoundHandle> {
        let chunk = Chunk::from_file(path).map_err(|reason| Error::Asset {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!("Loaded sound {}", path.display());
        self.chunks.push(chunk);
        Ok(SoundHandle(self.chunks.len() - 1))
    }

    fn sprite_size(&self, sprite: SpriteHandle) -> (u32, u32) {
        self.textures
            .get(sprite.0)
            .map(|texture| {
                let query = texture.query();
                (query.width, query.height)
            })
            .unwrap_or((0, 0))
    }

    fn play(&mut self, sound: SoundHandle, volume: f32) {
        let Some(chunk) = self.chunks.get(sound.0) else {
            return;
        };
        match Channel::all().play(chunk, 0) {
            Ok(channel) => {
                channel.set_volume((volume * sdl2::mixer::MAX_VOLUME as f32) as i32);
            }
            // All channels busy: drop the sound
            Err(err) => log::trace!("Sound skipped: {}", err),
        }
    }

    fn draw_background(&mut self, sprite: SpriteHandle) -> Result<()> {
        let texture = lookup(&self.textures, sprite)?;
        self.canvas.copy(texture, None, None).map_err(platform)
    }

    fn draw_sprite(
        &mut self,
        sprite: SpriteHandle,
        center: Vec2,
        rotation_degrees: f32,
        scale: f32,
    ) -> Result<()> {
        let texture = lookup(&self.textures, sprite)?;
        let query = texture.query();
        let w = (query.width as f32 * scale).max(1.0);
        let h = (query.height as f32 * scale).max(1.0);
        let dst = Rect::new(
            (center.x - w / 2.0).round() as i32,
            (center.y - h / 2.0).round() as i32,
            w as u32,
            h as u32,
        );
        self.canvas
            .copy_ex(texture, None, dst, rotation_degrees as f64, None, false, false)
            .map_err(platform)
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: u8, color: Color) -> Result<()> {
        self.canvas.set_draw_color(to_sdl(color));
        let mut points = Vec::new();
        for layer in 0..thickness {
            let r = radius - layer as f32;
            if r <= 0.0 {
                break;
            }
            let steps = (std::f32::consts::TAU * r).ceil() as usize;
            points.extend((0..steps).map(|i| {
                let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
                Point::new(
                    (center.x + r * angle.cos()).round() as i32,
                    (center.y + r * angle.sin()).round() as i32,
                )
            }));
        }
        self.canvas.draw_points(points.as_slice()).map_err(platform)
    }

    fn draw_text(&mut self, text: &str, anchor: TextAnchor, color: Color) -> Result<()> {
        let size = text_size(text);
        let origin = anchor.place(size, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT));
        self.canvas.set_draw_color(to_sdl(color));

        let pixel = TEXT_SCALE as i32;
        for (i, c) in text.chars().enumerate() {
            let char_x = origin.x as i32 + i as i32 * 6 * pixel;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..5 {
                    if (bits >> (4 - col)) & 1 == 1 {
                        self.canvas
                            .fill_rect(Rect::new(
                                char_x + col * pixel,
                                origin.y as i32 + row as i32 * pixel,
                                TEXT_SCALE,
                                TEXT_SCALE,
                            ))
                            .map_err(platform)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.canvas.present();
        Ok(())
    }

    fn tick(&mut self, fps: u32) -> f32 {
        let budget = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        let spent = self.last_frame.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let elapsed = self.last_frame.elapsed();
        self.last_frame = Instant::now();
        elapsed.as_secs_f32()
    }
}

impl InputSource for SdlFrontend<'_> {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.event_pump
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => Some(InputEvent::KeyDown(Key::Escape)),
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => Some(InputEvent::KeyDown(Key::Space)),
                Event::KeyUp {
                    keycode: Some(Keycode::P),
                    ..
                } => Some(InputEvent::KeyUp(Key::P)),
                _ => None,
            })
            .collect()
    }

    fn held_keys(&self) -> HeldKeys {
        let keyboard = self.event_pump.keyboard_state();
        HeldKeys {
            left: keyboard.is_scancode_pressed(Scancode::Left),
            right: keyboard.is_scancode_pressed(Scancode::Right),
            up: keyboard.is_scancode_pressed(Scancode::Up),
            down: keyboard.is_scancode_pressed(Scancode::Down),
        }
    }
}

fn to_sdl(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGB(color.r, color.g, color.b)
}

/// Pixel size of `text` in the bitmap font
fn text_size(text: &str) -> Vec2 {
    let chars = text.chars().count() as f32;
    let pixel = TEXT_SCALE as f32;
    Vec2::new((chars * 6.0 - 1.0).max(0.0) * pixel, 7.0 * pixel)
}

/// 5x7 glyph rows, most significant of the low five bits is the leftmost
/// pixel
fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10001, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00000, 0b00100, 0b00000, 0b00100, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        _ => [0; 7],
    }
}

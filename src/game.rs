//! The outer frame loop
//!
//! One iteration per frame: poll input, advance the simulation, play sounds,
//! draw, throttle. Generic over the frontend so it runs the same against SDL
//! and the headless recorder.

use crate::audio::AudioManager;
use crate::error::Result;
use crate::input::{FrameCommand, map_frame};
use crate::platform::Frontend;
use crate::renderer::{Assets, Hud, draw_frame};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

pub struct Game<F: Frontend> {
    frontend: F,
    state: GameState,
    assets: Assets,
    audio: AudioManager,
    target_fps: u32,
    paused_fps: u32,
    show_fps: bool,
    // FPS tracking
    frame_times: [f32; FPS_WINDOW],
    frame_index: usize,
    frames: u64,
}

impl<F: Frontend> Game<F> {
    /// Load assets and start a session. Missing assets abort here, before
    /// any frame runs.
    pub fn new(mut frontend: F, settings: &Settings) -> Result<Self> {
        let assets = Assets::load(&mut frontend, &settings.asset_dir)?;
        let metrics = assets.metrics(&frontend);

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting session with seed {}", seed);
        let state = GameState::with_metrics(seed, metrics);

        let mut audio = AudioManager::new(settings);
        for &(effect, sound) in &assets.sounds {
            audio.register(effect, sound);
        }

        Ok(Self {
            frontend,
            state,
            assets,
            audio,
            target_fps: settings.target_fps.max(1),
            paused_fps: settings.paused_fps.max(1),
            show_fps: settings.show_fps,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames: 0,
        })
    }

    /// Run until the player quits
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        log::info!(
            "Quit after {} frames, score {}",
            self.frames,
            self.state.score
        );
        Ok(())
    }

    /// One frame. Returns `false` when the player asked to quit; nothing is
    /// simulated or drawn on that frame.
    pub fn step(&mut self) -> Result<bool> {
        let events = self.frontend.poll_events();
        let held = self.frontend.held_keys();
        let input = match map_frame(&events, held) {
            FrameCommand::Quit => return Ok(false),
            FrameCommand::Play(input) => input,
        };

        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        self.audio.handle_events(&mut self.frontend, &events);

        let hud = Hud {
            fps: self.show_fps.then(|| self.fps()),
        };
        draw_frame(&mut self.frontend, &self.state, &self.assets, &hud)?;

        let fps = match self.state.phase {
            GamePhase::Paused => self.paused_fps,
            GamePhase::Running | GamePhase::Ended => self.target_fps,
        };
        let dt = self.frontend.tick(fps);
        self.record_frame(dt);
        Ok(true)
    }

    fn record_frame(&mut self, dt: f32) {
        self.frame_times[self.frame_index] = dt;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames += 1;
    }

    /// Average frame rate over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> f32 {
        let count = (self.frames as usize).min(FPS_WINDOW);
        let total: f32 = self.frame_times.iter().take(count).sum();
        if count == 0 || total <= 0.0 {
            return self.target_fps as f32;
        }
        count as f32 / total
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::INITIAL_ASTEROIDS;
    use crate::error::Error;
    use crate::platform::{DrawCall, HeadlessFrontend, HeldKeys, InputEvent, Key, ScriptedFrame};

    fn settings() -> Settings {
        Settings {
            seed: Some(2024),
            ..Default::default()
        }
    }

    fn frontend(frames: Vec<ScriptedFrame>) -> HeadlessFrontend {
        HeadlessFrontend::new()
            .with_sprite_size("spaceship", 48, 48)
            .with_sprite_size("asteroid", 96, 96)
            .with_sprite_size("bullet", 8, 8)
            .with_script(frames)
    }

    fn idle(n: usize) -> Vec<ScriptedFrame> {
        vec![ScriptedFrame::default(); n]
    }

    #[test]
    fn test_missing_asset_aborts_startup() {
        let fe = HeadlessFrontend::new().with_missing("space");
        let result = Game::new(fe, &settings());
        assert!(matches!(result, Err(Error::Asset { .. })));
    }

    #[test]
    fn test_run_until_script_ends() {
        let mut game = Game::new(frontend(idle(5)), &settings()).unwrap();
        game.run().unwrap();
        assert_eq!(game.frames(), 5);
        assert_eq!(game.state().time_ticks, 5);
        let presents = game
            .frontend()
            .calls
            .iter()
            .filter(|c| **c == DrawCall::Present)
            .count();
        assert_eq!(presents, 5);
        assert_eq!(game.frontend().ticks, vec![60; 5]);
    }

    #[test]
    fn test_escape_quits_before_simulating() {
        let frames = vec![ScriptedFrame::events(vec![InputEvent::KeyDown(Key::Escape)])];
        let mut game = Game::new(frontend(frames), &settings()).unwrap();
        assert!(!game.step().unwrap());
        assert_eq!(game.state().time_ticks, 0);
        assert!(game.frontend().calls.is_empty());
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = Game::new(frontend(Vec::new()), &settings()).unwrap();
        let b = Game::new(frontend(Vec::new()), &settings()).unwrap();
        assert_eq!(a.state().asteroids.len(), INITIAL_ASTEROIDS);
        assert_eq!(a.state().asteroids, b.state().asteroids);
        assert_eq!(a.state().seed, 2024);
    }

    #[test]
    fn test_sprite_widths_set_radii() {
        let fe = HeadlessFrontend::new()
            .with_sprite_size("spaceship", 40, 40)
            .with_sprite_size("asteroid", 64, 64);
        let game = Game::new(fe, &settings()).unwrap();
        assert_eq!(game.state().ship.as_ref().unwrap().body.radius, 20.0);
        for asteroid in &game.state().asteroids {
            assert_eq!(asteroid.body.radius, 32.0);
        }
    }

    #[test]
    fn test_fire_plays_laser() {
        let frames = vec![ScriptedFrame::events(vec![InputEvent::KeyDown(Key::Space)])];
        let mut game = Game::new(frontend(frames), &settings()).unwrap();
        assert!(game.step().unwrap());
        assert_eq!(game.state().bullets.len(), 1);
        assert_eq!(game.frontend().played.len(), 1);
        let (sound, _) = game.frontend().played[0];
        assert_eq!(
            game.frontend().sound_path(sound),
            Some(std::path::Path::new("assets/sounds/laser.wav"))
        );

        let muted = Settings {
            muted: true,
            ..settings()
        };
        let frames = vec![ScriptedFrame::events(vec![InputEvent::KeyDown(Key::Space)])];
        let mut game = Game::new(frontend(frames), &muted).unwrap();
        game.step().unwrap();
        assert!(game.frontend().played.is_empty());
    }

    #[test]
    fn test_pause_throttles_loop() {
        let pause = ScriptedFrame::events(vec![InputEvent::KeyUp(Key::P)]);
        let thrust = ScriptedFrame::held(HeldKeys {
            up: true,
            ..Default::default()
        });
        let frames = vec![pause.clone(), thrust.clone(), thrust, pause];
        let mut game = Game::new(frontend(frames), &settings()).unwrap();
        game.run().unwrap();

        assert_eq!(game.frontend().ticks, vec![1, 1, 1, 60]);
        assert_eq!(game.state().phase, GamePhase::Running);
        // Held thrust while paused does nothing; only the resume frame ran
        assert_eq!(game.state().time_ticks, 1);
        let ship = game.state().ship.as_ref().unwrap();
        assert_eq!(ship.body.vel, glam::Vec2::ZERO);
    }

    #[test]
    fn test_fps_readout() {
        let with_fps = Settings {
            show_fps: true,
            ..settings()
        };
        let mut game = Game::new(frontend(idle(3)), &with_fps).unwrap();
        game.run().unwrap();
        assert!((game.fps() - 60.0).abs() < 1e-3);
        let shows_fps = game.frontend().calls.iter().any(|c| {
            matches!(c, DrawCall::Text { text, .. } if text.starts_with("FPS"))
        });
        assert!(shows_fps);
    }
}

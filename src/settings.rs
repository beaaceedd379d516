//! Game settings and preferences
//!
//! Stored as JSON next to the game (`space_rocks.json`), or wherever
//! `SPACE_ROCKS_SETTINGS` points. A missing file means defaults; a broken
//! one is reported and also means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{PAUSED_FPS, TARGET_FPS};
use crate::error::{Error, Result};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Frame rate while playing
    pub target_fps: u32,
    /// Frame rate while paused
    pub paused_fps: u32,
    /// Fixed session seed; random when absent
    pub seed: Option<u64>,

    // === Assets ===
    /// Directory holding `sprites/` and `sounds/`
    pub asset_dir: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Display ===
    /// Integer window scale over the 800x600 arena
    pub window_scale: u32,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            paused_fps: PAUSED_FPS,
            seed: None,

            asset_dir: PathBuf::from("assets"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            window_scale: 1,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Default file name, relative to the working directory
    pub const FILE_NAME: &'static str = "space_rocks.json";

    /// Environment variable overriding the settings path
    pub const PATH_ENV: &'static str = "SPACE_ROCKS_SETTINGS";

    /// Where settings are read from and saved to
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::FILE_NAME))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("{}, using defaults", describe(&err));
                Self::default()
            }
        }
    }

    /// Read and parse `path`. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| Error::Settings {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Some(settings.sanitized()))
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values into usable ranges
    pub fn sanitized(mut self) -> Self {
        self.target_fps = self.target_fps.max(1);
        self.paused_fps = self.paused_fps.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.window_scale = self.window_scale.max(1);
        self
    }
}

fn describe(err: &Error) -> String {
    match err {
        Error::Settings { source, .. } => format!("{err}: {source}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("space_rocks_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.target_fps, 60);
        assert_eq!(s.paused_fps, 1);
        assert_eq!(s.seed, None);
        assert_eq!(s.asset_dir, PathBuf::from("assets"));
        assert!(!s.muted);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = scratch("missing");
        let _ = fs::remove_file(&path);
        assert!(Settings::read(&path).unwrap().is_none());
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch("partial");
        fs::write(&path, r#"{ "seed": 42, "muted": true, "master_volume": 3.0 }"#).unwrap();
        let s = Settings::load_from(&path);
        assert_eq!(s.seed, Some(42));
        assert!(s.muted);
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.target_fps, 60);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_file() {
        let path = scratch("malformed");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::read(&path), Err(Error::Settings { .. })));
        assert_eq!(Settings::load_from(&path), Settings::default());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("saved");
        let settings = Settings {
            seed: Some(7),
            show_fps: true,
            window_scale: 2,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_sanitized_floors() {
        let s = Settings {
            target_fps: 0,
            paused_fps: 0,
            window_scale: 0,
            sfx_volume: -1.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s.target_fps, 1);
        assert_eq!(s.paused_fps, 1);
        assert_eq!(s.window_scale, 1);
        assert_eq!(s.sfx_volume, 0.0);
    }
}

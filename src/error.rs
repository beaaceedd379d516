//! Error types
//!
//! Only the outer shell can fail: loading assets, bringing up the platform,
//! reading settings. The simulation itself has no failure paths.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A sprite or sound could not be loaded. Fatal at startup.
    #[error("Failed to load asset {}: {reason}", .path.display())]
    Asset { path: PathBuf, reason: String },
    /// Window, renderer or audio device failure
    #[error("Platform error: {0}")]
    Platform(String),
    /// Settings file exists but is not valid JSON for `Settings`
    #[error("Malformed settings file {}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

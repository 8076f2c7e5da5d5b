//! Gameplay Settings
//!
//! The six toggles exposed by the settings panel. The core reads them every tick
//! as plain flags; they are persisted as JSON next to the executable.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Error type for loading and saving JSON config files.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON or wrong field types.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SettingsError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Serialize `value` as pretty JSON and write it to `path`.
pub fn save_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), SettingsError> {
    let data = serde_json::to_vec_pretty(value)?;
    fs::write(path, data)?;
    Ok(())
}

/// Load `path`, falling back to `T::default()` (with a warning) on any failure.
pub fn load_or_default<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    let path = path.as_ref();
    match load_json(path) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "using default config");
            T::default()
        }
    }
}

/// Gameplay toggles. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Box collision between the player and props
    pub collision_detection: bool,
    /// Vertical gravity and ground snapping
    pub gravity_enabled: bool,
    /// Debug wireframes for every collision box
    pub show_collision_boxes: bool,
    /// Debug markers under the player's feet
    pub show_foot_boxes: bool,
    /// Landing cue
    pub sound_effects: bool,
    /// Background music
    pub background_sound: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            collision_detection: true,
            gravity_enabled: true,
            show_collision_boxes: false,
            show_foot_boxes: false,
            sound_effects: true,
            background_sound: true,
        }
    }
}

impl GameSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load_json(path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        load_or_default(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        save_json(path, self)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }
}

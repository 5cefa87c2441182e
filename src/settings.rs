//! Game settings and preferences
//!
//! Stored through the save envelope; missing fields fall back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::CANCEL_DEADZONE;
use crate::persistence::{self, PersistenceError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for anchor sampling; random per run when unset
    pub rng_seed: Option<u64>,
    /// Cancel axis value the menu must exceed to close
    pub cancel_deadzone: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Files ===
    /// Authored level catalog
    pub levels_path: PathBuf,
    /// High score save file
    pub high_scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rng_seed: None,
            cancel_deadzone: CANCEL_DEADZONE,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            levels_path: PathBuf::from("assets/levels.json"),
            high_scores_path: PathBuf::from("save/highscores.json"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, using defaults when none are saved
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        match persistence::load(path)? {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(&tmp.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{ "version": 1, "payload": { "rng_seed": 7, "muted": true } }"#)
            .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.rng_seed, Some(7));
        assert!(settings.muted);
        assert_eq!(settings.cancel_deadzone, CANCEL_DEADZONE);
    }

    #[test]
    fn test_save_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        let settings = Settings {
            rng_seed: Some(11),
            sfx_volume: 0.25,
            ..Settings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }
}

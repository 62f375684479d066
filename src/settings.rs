//! Game settings with persistence
//!
//! Settings are saved to `~/.config/skirmish/settings.toml`

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use skirmish_core::TimeConfig;
use skirmish_game::MotionConfig;
use skirmish_physics::PhysicsConfig;

/// All game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSettings {
    pub physics: PhysicsConfig,
    pub time: TimeConfig,
    pub motion: MotionConfig,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skirmish"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, writing defaults");
            let settings = Self::default();
            settings.save();
            return settings;
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(dir) = Self::config_dir() else {
            warn!("Could not determine config directory");
            return;
        };

        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("Failed to create config directory: {}", e);
            return;
        }

        let path = dir.join("settings.toml");
        match toml::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    warn!("Failed to write settings: {}", e);
                } else {
                    info!("Saved settings to {:?}", path);
                }
            }
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_toml_round_trip() {
        let settings = GameSettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed: GameSettings = toml::from_str(&text).unwrap();

        assert_eq!(parsed.physics.timestep, settings.physics.timestep);
        assert_eq!(parsed.motion.jump_force, settings.motion.jump_force);
        assert_eq!(parsed.time.fixed_timestep, settings.time.fixed_timestep);
    }
}

//! Host settings and preferences
//!
//! Persisted as JSON next to the leaderboard, separate from gameplay tuning.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::SCORES_TO_SHOW;

/// Host settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded with each finished game
    pub player_name: String,
    /// Leaderboard table location
    pub leaderboard_path: PathBuf,
    /// Rows per leaderboard panel
    pub scores_to_show: usize,
    /// Optional gameplay tuning file
    pub tuning_path: Option<PathBuf>,
    /// Seed for serve directions (same seed, same game)
    pub seed: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Background loop muted
    pub muted: bool,

    // === Demo ===
    /// Tick cap for headless autopilot sessions
    pub max_demo_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            leaderboard_path: PathBuf::from("leaderboard.jsonl"),
            scores_to_show: SCORES_TO_SHOW,
            tuning_path: None,
            seed: 0x5EED,

            master_volume: 0.8,
            music_volume: 1.0,
            muted: false,

            max_demo_ticks: 200_000,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Ok(json) = std::fs::read_to_string(path) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(err) => log::warn!("Ignoring malformed settings {}: {}", path.display(), err),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Flip the background loop on or off
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.scores_to_show, 6);
        assert!(!settings.muted);
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = Settings::default();
        assert!(settings.effective_music_volume() > 0.0);
        settings.toggle_mute();
        assert_eq!(settings.effective_music_volume(), 0.0);
        settings.toggle_mute();
        assert!(settings.effective_music_volume() > 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            player_name: "Ada".to_string(),
            scores_to_show: 3,
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.player_name, "Ada");
        assert_eq!(loaded.scores_to_show, 3);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path).player_name, "Player");
    }
}

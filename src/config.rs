//! Persisted user preferences
//!
//! Speed and color mode survive restarts as JSON under the platform
//! config directory. Load failures fall back to defaults; nothing here
//! is fatal.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::drawer::{ColorMode, DEFAULT_INTERVAL_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Tick interval in milliseconds (100-1000).
    pub interval_ms: u64,
    pub color_mode: ColorMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            color_mode: ColorMode::Red,
        }
    }
}

impl Settings {
    fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "squares")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("settings.json")
    }

    /// Load saved preferences, falling back to defaults on any failure.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to load settings");
                Self::default()
            }
        }
    }

    /// Save preferences, logging rather than surfacing any failure.
    pub fn save(&self) {
        let path = Self::config_path();
        if let Err(err) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), %err, "failed to save settings");
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        Ok(settings.clamped())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Keep a hand-edited or stale file within the slider range.
    fn clamped(mut self) -> Self {
        self.interval_ms = self.interval_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("squares_test_{}_{}.json", std::process::id(), name))
    }

    #[test]
    fn test_roundtrip() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            interval_ms: 250,
            color_mode: ColorMode::Random,
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_out_of_range_interval_is_clamped() {
        let path = temp_path("clamp");
        std::fs::write(&path, r#"{"interval_ms": 5, "color_mode": "green"}"#).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.interval_ms, MIN_INTERVAL_MS);
        assert_eq!(loaded.color_mode, ColorMode::Green);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = temp_path("missing");
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(settings.color_mode, ColorMode::Red);
        assert!(settings.interval_ms >= MIN_INTERVAL_MS);
        assert!(settings.interval_ms <= MAX_INTERVAL_MS);
    }
}

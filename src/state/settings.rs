//! User-tunable settings
//!
//! Stored as JSON next to the other per-user configuration files.
//! Any field missing from the file falls back to its default, so an empty
//! object `{}` is a valid settings file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::code::content::DEFAULT_ROLE_TAG;
use crate::code::encoder::DEFAULT_CODE_SIZE;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// All settings of the application
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Last segment of every payload
    pub role_tag: String,

    /// Edge length of the encoded bitmap in pixels (width = height)
    pub code_size: u32,

    /// On-screen edge length of the code in logical pixels
    /// - Display only, the bitmap is scaled to fit
    pub preview_size: f32,

    /// Seconds between date re-checks while the code is shown
    /// - 0 = only re-check when the window regains focus
    pub refresh_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            role_tag: DEFAULT_ROLE_TAG.to_string(),
            code_size: DEFAULT_CODE_SIZE,
            preview_size: 400.0,
            refresh_interval_secs: 60,
        }
    }
}

impl Settings {
    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Location of the settings file:
    /// ~/.config/qrc-generator/settings.json on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("qrc-generator");
            path.push("settings.json");
            path
        })
    }

    /// Load settings from the default location.
    ///
    /// Never fails: a missing file or unknown config directory gives the
    /// defaults, and a broken file is reported and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::info!("⚙️  No config directory, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(settings)) => {
                log::info!("⚙️  Settings loaded from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("⚙️  No settings at {}, writing defaults", path.display());
                let settings = Self::default();
                if let Err(e) = settings.save_to(&path) {
                    log::warn!("⚠️  Could not write default settings: {}", e);
                }
                settings
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from `path`, `Ok(None)` if the file does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(Some(Self::from_json(&json)?))
    }

    /// Write settings to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.role_tag, "student");
        assert_eq!(settings.code_size, 1080);
        assert_eq!(settings.refresh_interval_secs, 60);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "role_tag": "staff" }"#).unwrap();
        assert_eq!(settings.role_tag, "staff");
        assert_eq!(settings.code_size, 1080);
        assert_eq!(settings.preview_size, 400.0);
    }

    #[test]
    fn test_serialization() {
        let mut settings = Settings::default();
        settings.code_size = 512;
        settings.refresh_interval_secs = 0;

        let json = settings.to_json().unwrap();
        let restored = Settings::from_json(&json).unwrap();

        assert_eq!(settings, restored);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Settings::from_json("{ role_tag: ").is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("qrc-generator-no-such-settings.json");
        assert!(Settings::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("qrc-generator-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "preview_size": 300.0 }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap().unwrap();
        assert_eq!(settings.preview_size, 300.0);
        assert_eq!(settings.role_tag, "student");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = std::env::temp_dir()
            .join(format!("qrc-generator-settings-dir-{}", std::process::id()));
        let path = dir.join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.role_tag = "staff".to_string();
        settings.save_to(&path).unwrap();

        let restored = Settings::load_from(&path).unwrap().unwrap();
        assert_eq!(restored, settings);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

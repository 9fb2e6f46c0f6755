//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Scheduling-service endpoint and timeout
//! - Review session tuning (timer, batch size, mode, scale, sound)
//! - Stats display (heatmap window)
//!
//! Configuration is stored at `~/.config/hafiz/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::review::{GradingScale, ReviewOptions, SessionMode};

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Review session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_timer_secs")]
    pub timer_secs: u32,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_mode")]
    pub mode: SessionMode,
    #[serde(default = "default_scale")]
    pub scale: GradingScale,
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Stats display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_heatmap_months")]
    pub heatmap_months: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/hafiz/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_timer_secs() -> u32 {
    30
}
fn default_batch_size() -> usize {
    50
}
fn default_mode() -> SessionMode {
    SessionMode::Quiz
}
fn default_scale() -> GradingScale {
    GradingScale::ThreePoint
}
fn default_true() -> bool {
    true
}
fn default_heatmap_months() -> u32 {
    6
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            timer_secs: default_timer_secs(),
            batch_size: default_batch_size(),
            mode: default_mode(),
            scale: default_scale(),
            sound: default_true(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            heatmap_months: default_heatmap_months(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            review: ReviewConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl Config {
    /// Configuration file location, `~/.config/hafiz/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or_else(|| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: "no config directory on this platform".into(),
        })?;
        Ok(dir.join("hafiz").join("config.toml"))
    }

    /// Load from the default location; a missing file is the default config.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Save to the default location, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// The `[review]` section as engine options.
    pub fn review_options(&self) -> ReviewOptions {
        ReviewOptions {
            mode: self.review.mode,
            scale: self.review.scale,
            timer_secs: self.review.timer_secs,
            batch_size: self.review.batch_size,
            sound: self.review.sound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.review.timer_secs, 30);
        assert_eq!(config.review.batch_size, 50);
        assert_eq!(config.review.mode, SessionMode::Quiz);
        assert_eq!(config.review.scale, GradingScale::ThreePoint);
        assert!(config.review.sound);
        assert_eq!(config.stats.heatmap_months, 6);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.review.timer_secs = 45;
        config.review.mode = SessionMode::Plain;
        config.review.scale = GradingScale::FivePoint;
        config.api.base_url = "https://memorize.example/api".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.review.timer_secs, 45);
        assert_eq!(loaded.review.mode, SessionMode::Plain);
        assert_eq!(loaded.review.scale, GradingScale::FivePoint);
        assert_eq!(loaded.api.base_url, "https://memorize.example/api");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.review.timer_secs, 30);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[review]\ntimer_secs = 20\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.review.timer_secs, 20);
        assert_eq!(config.review.batch_size, 50);
        assert_eq!(config.api.base_url, default_base_url());
    }

    #[test]
    fn review_options_mirror_the_section() {
        let mut config = Config::default();
        config.review.sound = false;
        config.review.batch_size = 10;
        let options = config.review_options();
        assert!(!options.sound);
        assert_eq!(options.batch_size, 10);
        assert_eq!(options.timer_secs, 30);
    }
}

//! Configuration file support for themeportal
//!
//! Handles `.themeportal.toml` configuration file loading and saving.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".themeportal.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog location: a file path or an http(s) URL
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Theme applied once the catalog is loaded
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Audio backend configuration
    #[serde(default)]
    pub audio: AudioConfig,

    /// Log file configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            default_theme: default_theme(),
            audio: AudioConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_catalog() -> String {
    crate::catalog::DEFAULT_CATALOG.to_string()
}

fn default_theme() -> String {
    crate::theme::KnownTheme::DEFAULT.id().to_string()
}

/// Audio playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Initial volume, 0.0 to 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_volume() -> f32 {
    1.0
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file written while the terminal portal runs
    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    /// Filter directive, overridden by `THEMEPORTAL_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("themeportal.log")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration file (returns default if not found)
    ///
    /// Searches for `.themeportal.toml` in the current directory.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to specified path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default(path: &Path) -> Result<()> {
        let config = Config::default();
        config.save_to(path)
    }
}

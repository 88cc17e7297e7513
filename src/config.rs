//! Configuration file handling for asciify.
//!
//! Loads configuration from `~/.config/asciify/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::scale::{ScaleFactor, IDENTITY_PERCENT};

/// Base font line height in pixels at 100% scale.
pub const DEFAULT_BASE_LINE_HEIGHT: f32 = 100.0;

/// Configuration file structure for asciify.
/// Loaded from ~/.config/asciify/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Base log level (error, warn, info, debug, trace)
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub font: FontConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Scale percentage used when none is given on the command line
    #[serde(default = "default_scale")]
    pub default_scale: i64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_scale: default_scale(),
        }
    }
}

impl RenderConfig {
    pub fn default_scale_factor(&self) -> ScaleFactor {
        ScaleFactor::from_percent(self.default_scale)
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct FontConfig {
    /// Line height in pixels at 100% scale
    #[serde(default = "default_base_line_height")]
    pub base_line_height: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            base_line_height: default_base_line_height(),
        }
    }
}

fn default_scale() -> i64 {
    IDENTITY_PERCENT as i64
}

fn default_base_line_height() -> f32 {
    DEFAULT_BASE_LINE_HEIGHT
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config = Self::parse(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("asciify").join("config.toml"))
}

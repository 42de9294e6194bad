//! Application configuration.
//!
//! Stored as TOML at `~/.config/naga-config/config.toml`. Every field is
//! optional; a missing file means defaults.
//!
//! ```toml
//! karabiner_config = "/Users/me/.config/karabiner/karabiner.json"
//! mappings_file = "/Users/me/Library/Application Support/naga-config/mappings.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or saving the app config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Karabiner-Elements config the rules are spliced into
    pub karabiner_config: PathBuf,
    /// Where the button mapping table is kept
    pub mappings_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            karabiner_config: default_karabiner_path(),
            mappings_file: default_mappings_path(),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.config/karabiner/karabiner.json`, where Karabiner-Elements reads its
/// config on every platform it runs on.
pub fn default_karabiner_path() -> PathBuf {
    home_dir()
        .join(".config")
        .join("karabiner")
        .join("karabiner.json")
}

/// `<data dir>/naga-config/mappings.json`
pub fn default_mappings_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| home_dir().join(".local").join("share"))
        .join("naga-config")
        .join("mappings.json")
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("naga-config")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse from a TOML string; absent keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, karabiner: Option<PathBuf>, mappings: Option<PathBuf>) -> Self {
        if let Some(path) = karabiner {
            self.karabiner_config = path;
        }
        if let Some(path) = mappings {
            self.mappings_file = path;
        }
        self
    }
}

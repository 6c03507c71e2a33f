//! Configuration for the cosmic starfield.
//!
//! The config lives in `config.toml` inside the platform config directory.
//! A missing file means defaults; a malformed one, or one with values the
//! starfield cannot run with, is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cosmic_core::{AnimationSpeed, StarfieldSettings};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading or saving the config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Config`].
    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file parsed but a value is out of range.
    #[error("invalid config at {path}: {field} {reason}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No home directory to derive the config path from.
    #[error("could not determine a config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text placed on the clipboard by the copy button.
    pub copy_text: String,
    /// How long the "Copied!" label stays up, in milliseconds.
    pub feedback_ms: u64,
    /// Frame cadence.
    pub speed: AnimationSpeed,
    pub starfield: StarfieldSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            copy_text: "cosmic.online".to_string(),
            feedback_ms: 1800,
            speed: AnimationSpeed::default(),
            starfield: StarfieldSettings::default(),
        }
    }
}

impl Config {
    /// Path of the config file in the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "cosmic")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .starfield
            .validate()
            .map_err(|invalid| ConfigError::Invalid {
                path: path.to_path_buf(),
                field: invalid.field,
                reason: invalid.reason,
            })?;
        Ok(config)
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Duration of the "Copied!" confirmation.
    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

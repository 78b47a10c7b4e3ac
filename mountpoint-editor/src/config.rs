// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_ID: &str = "anaconda-mountpoints";

/// Where the installer publishes the address of its private bus.
pub const DEFAULT_BUS_ADDRESS_FILE: &str = "/run/anaconda/bus.address";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid mount point preset {0:?}")]
    InvalidPreset(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub log_level: LoggingLevel,
    pub log_to_disk: bool,
    /// Directory of the rolling log file; defaults to the XDG state directory
    pub log_dir: Option<PathBuf>,
    /// Offered in the mount-point select before any custom value
    pub mount_point_presets: Vec<String>,
    /// Explicit bus address; takes precedence over `bus_address_file`
    pub bus_address: Option<String>,
    pub bus_address_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LoggingLevel::Info,
            log_to_disk: false,
            log_dir: None,
            mount_point_presets: vec!["/".to_string(), "/boot".to_string(), "/home".to_string()],
            bus_address: None,
            bus_address_file: PathBuf::from(DEFAULT_BUS_ADDRESS_FILE),
        }
    }
}

impl Config {
    /// `$XDG_CONFIG_HOME/anaconda-mountpoints/config.toml`, falling back to `~/.config`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join(APP_ID).join("config.toml"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for preset in &self.mount_point_presets {
            match crate::validate::parse_custom_mount_point(preset) {
                Ok(normalized) if !normalized.is_empty() && normalized == *preset => {}
                _ => return Err(ConfigError::InvalidPreset(preset.clone())),
            }
        }
        Ok(())
    }
}

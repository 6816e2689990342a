//! # Configuration Management Module
//!
//! Builds a [`Logger`] from a small TOML document and environment overrides.
//! This sits outside the formatting core: it is the only place in the crate
//! that opens files, and the only fallible surface.
//!
//! ## File Format
//!
//! ```toml
//! level = "debug"
//! hide_callstack = true
//! output = { file = "/var/log/app.log" }   # or "stdout" / "stderr"
//! ```
//!
//! Every key is optional.
//!
//! ## Environment Overrides
//!
//! - `CLOG_LEVEL`: level name, same parsing rules as the file
//! - `CLOG_HIDE_CALLSTACK`: `1`/`true` hides, `0`/`false` shows
//!
//! ## Configuration Storage Locations
//!
//! [`LoggerConfig::load`] reads `clog/config.toml` under the platform config
//! directory:
//! - **Windows**: `%APPDATA%\clog\config.toml`
//! - **macOS**: `~/Library/Application Support/clog/config.toml`
//! - **Linux**: `~/.config/clog/config.toml`

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::level::Level;
use crate::logger::Logger;

/// Overrides `level` when set.
pub const ENV_LEVEL: &str = "CLOG_LEVEL";
/// Overrides `hide_callstack`; accepts `1`/`true` and `0`/`false`.
pub const ENV_HIDE_CALLSTACK: &str = "CLOG_HIDE_CALLSTACK";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to open log file {}: {source}", path.display())]
    OpenOutput { path: PathBuf, source: io::Error },

    #[error("could not find config directory")]
    NoConfigDir,
}

/// Where records go.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
    /// Append to a file, creating it if needed.
    File(PathBuf),
}

/// Logger settings as read from `config.toml`. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level name. Unrecognized names mean `info`.
    pub level: String,
    pub hide_callstack: bool,
    pub output: OutputTarget,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO.as_str().to_string(),
            hide_callstack: false,
            output: OutputTarget::Stdout,
        }
    }
}

impl LoggerConfig {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse the TOML file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from the platform config directory, then apply environment
    /// overrides. A missing, unreadable or corrupt file yields defaults.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Using default logger config: {}", e);
                    Self::default()
                }
            },
            Ok(path) => {
                debug!("No logger config at {}", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Using default logger config: {}", e);
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Override fields from `CLOG_LEVEL` and `CLOG_HIDE_CALLSTACK`.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_LEVEL).ok().as_deref(),
            std::env::var(ENV_HIDE_CALLSTACK).ok().as_deref(),
        );
    }

    fn apply_overrides(&mut self, level: Option<&str>, hide_callstack: Option<&str>) {
        if let Some(level) = level {
            self.level = level.to_string();
        }
        match hide_callstack.map(str::trim) {
            Some("1") | Some("true") => self.hide_callstack = true,
            Some("0") | Some("false") => self.hide_callstack = false,
            Some(other) => warn!("Ignoring {}={:?}", ENV_HIDE_CALLSTACK, other),
            None => {}
        }
    }

    /// Parsed `level`.
    pub fn level(&self) -> Level {
        Level::parse(&self.level)
    }

    /// Apply level, call-stack visibility and output to an existing logger.
    pub fn apply_to(&self, logger: &Logger) -> Result<(), ConfigError> {
        match &self.output {
            OutputTarget::Stdout => {
                logger.set_output(io::stdout());
            }
            OutputTarget::Stderr => {
                logger.set_output(io::stderr());
            }
            OutputTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| ConfigError::OpenOutput {
                        path: path.clone(),
                        source,
                    })?;
                logger.set_output(file);
            }
        }
        logger.set_level(self.level());
        if self.hide_callstack {
            logger.hide_callstack();
        } else {
            logger.show_callstack();
        }
        Ok(())
    }

    /// New logger configured from these settings.
    pub fn build(&self) -> Result<Logger, ConfigError> {
        let logger = Logger::new();
        self.apply_to(&logger)?;
        Ok(logger)
    }

    /// `<config dir>/clog/config.toml`.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("clog").join("config.toml"))
    }
}

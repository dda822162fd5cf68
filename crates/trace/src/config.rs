//! Logger configuration
//!
//! Loggers can be described in TOML and built from that description:
//!
//! ```toml
//! level = "debug"
//! name = "gateway"
//! file = "/var/log/gateway.log"
//! append = true
//! color = false
//! ```
//!
//! Every key is optional.

use crate::builder::LoggerBuilder;
use crate::engine::{DEFAULT_TIME_FORMAT, is_valid_time_format};
use crate::error::{Error, Result};
use crate::level::Level;
use crate::logger::SharedLogger;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Configuration for a stdout (and optionally file) logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level
    pub level: Level,
    /// Logger name; unnamed when absent
    pub name: Option<String>,
    /// Also write to this file
    pub file: Option<PathBuf>,
    /// Append to the file instead of truncating it
    pub append: bool,
    /// Colourise the level column
    pub color: bool,
    /// `chrono` strftime layout for timestamps
    pub time_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            name: None,
            file: None,
            append: true,
            color: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Start a builder from the defaults
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::new()
    }

    /// Parse from a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// A [`LoggerBuilder`] set up from this configuration, with the log file
    /// (if any) already opened
    pub fn logger_builder(&self) -> Result<LoggerBuilder> {
        if !is_valid_time_format(&self.time_format) {
            return Err(Error::InvalidTimeFormat(self.time_format.clone()));
        }

        let mut builder = LoggerBuilder::new(self.level)
            .name(self.name.clone().unwrap_or_default())
            .color(self.color)
            .time_format(self.time_format.clone());

        if let Some(path) = &self.file {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(self.append)
                .truncate(!self.append)
                .open(path)
                .map_err(|source| Error::OpenFile {
                    path: path.clone(),
                    source,
                })?;
            builder = builder.file(file);
        }

        Ok(builder)
    }

    /// Build the configured logger
    pub fn build_logger(&self) -> Result<SharedLogger> {
        Ok(self.logger_builder()?.build())
    }
}

/// Builder for [`LoggerConfig`]
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    /// Set the minimum level
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.config.level = level;
        self
    }

    /// Set the logger name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Set the log file path
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = Some(path.into());
        self
    }

    /// Set whether the log file is appended to
    #[must_use]
    pub const fn append(mut self, append: bool) -> Self {
        self.config.append = append;
        self
    }

    /// Set whether the level column is colourised
    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.config.color = color;
        self
    }

    /// Set the timestamp layout
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.config.time_format = format.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> LoggerConfig {
        self.config
    }
}

//! Error types for logger construction and configuration

use std::io;
use std::path::PathBuf;

/// Result type for fallible setup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or installing loggers.
///
/// Logging calls themselves never fail; these only come out of setup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to open the log file
    #[error("Failed to open log file at {path}: {source}")]
    OpenFile {
        /// The path that failed to open
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to read a configuration file
    #[error("Failed to read config at {path}: {source}")]
    ReadConfig {
        /// The path that failed to be read
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Configuration was not valid TOML for a logger config
    #[error(transparent)]
    ParseConfig(#[from] toml::de::Error),

    /// Timestamp layout contains a specifier chrono does not know
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// Level string or number did not name a level
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    /// A `log` logger was already installed
    #[cfg(feature = "log-compat")]
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),

    /// A global `tracing` subscriber was already installed
    #[cfg(feature = "tracing-compat")]
    #[error(transparent)]
    TracingInit(#[from] tracing::subscriber::SetGlobalDefaultError),
}

//! Log severity levels

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from least to most severe.
///
/// `Disabled` sits above every real level. A logger whose minimum level is
/// `Disabled` rejects every record, and nothing is ever emitted *at* the
/// `Disabled` level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum Level {
    /// Verbose diagnostics, usually off in production
    Debug = -1,
    /// Normal operational messages
    #[default]
    Info = 0,
    /// Something unexpected that the program recovered from
    #[serde(alias = "warning")]
    Warn = 1,
    /// An operation failed
    Error = 2,
    /// Unrecoverable; the process terminates after the record is written
    Fatal = 5,
    /// Sentinel that suppresses everything
    #[serde(alias = "off")]
    Disabled = 127,
}

/// Level that disables all logging when used as a logger's minimum.
///
/// ```
/// use proven_trace::{Level, disabled_level};
///
/// assert_eq!(disabled_level().as_i8(), 127);
/// assert!(disabled_level() > Level::Fatal);
/// ```
#[must_use]
pub const fn disabled_level() -> Level {
    Level::Disabled
}

impl Level {
    /// All levels a record can actually be emitted at, least severe first
    pub const EMITTABLE: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Numeric value of the level
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    /// Upper-case name used by the console encoder
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Disabled => "DISABLED",
        }
    }

    /// Whether a record at `self` passes a filter whose minimum is `min`.
    #[inline(always)]
    #[must_use]
    pub fn passes(self, min: Self) -> bool {
        self != Self::Disabled && self >= min
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i8> for Level {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Error> {
        match value {
            -1 => Ok(Self::Debug),
            0 => Ok(Self::Info),
            1 => Ok(Self::Warn),
            2 => Ok(Self::Error),
            5 => Ok(Self::Fatal),
            127 => Ok(Self::Disabled),
            other => Err(Error::UnknownLevel(other.to_string())),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "disabled" | "off" => Ok(Self::Disabled),
            _ => trimmed
                .parse::<i8>()
                .map_err(|_| Error::UnknownLevel(trimmed.to_string()))
                .and_then(Self::try_from),
        }
    }
}

#[cfg(feature = "tracing-compat")]
impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            // No trace level here; trace folds into debug
            tracing::Level::DEBUG | tracing::Level::TRACE => Self::Debug,
        }
    }
}

#[cfg(feature = "log-compat")]
impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug | log::Level::Trace => Self::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Disabled);
    }

    #[test]
    fn test_passes() {
        assert!(Level::Info.passes(Level::Info));
        assert!(Level::Error.passes(Level::Info));
        assert!(!Level::Debug.passes(Level::Info));

        for level in Level::EMITTABLE {
            assert!(!level.passes(Level::Disabled));
        }
        // Nothing is emitted at the sentinel itself, even with the lowest minimum
        assert!(!Level::Disabled.passes(Level::Debug));
    }

    #[test]
    fn test_parse() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" error ".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("off".parse::<Level>().unwrap(), Level::Disabled);
        assert_eq!("127".parse::<Level>().unwrap(), Level::Disabled);
        assert_eq!("-1".parse::<Level>().unwrap(), Level::Debug);

        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown log level: verbose");
        assert!("42".parse::<Level>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::Warn.to_string(), "WARN");
        assert_eq!(Level::Fatal.to_string(), "FATAL");
        assert_eq!(disabled_level().as_i8(), 127);
    }
}

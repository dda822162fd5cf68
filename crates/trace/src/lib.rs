//! Structured logging facade
//!
//! This crate provides:
//! - A [`Logger`] trait for leveled, structured records with typed fields
//! - A no-op logger that is safe to use anywhere logging is not wanted
//! - A process-wide default logger with get/set semantics
//! - Constructors for loggers writing to stdout, a file, or both
//! - Request-scoped [`Context`] values that carry a logger
//!
//! ```no_run
//! use proven_trace::{Field, Level, Logger};
//!
//! let logger = proven_trace::new(Level::Info, "api", None);
//! logger.info("listening", &[Field::int("port", 8080)]);
//!
//! let conn = logger.with(&[Field::str("peer", "10.0.0.7")]);
//! conn.warn("slow handshake", &[Field::int("ms", 1200)]);
//!
//! proven_trace::set_default_logger(Some(logger));
//! proven_trace::info!("ready after {} ms", 42);
//! ```

#![warn(missing_docs, unreachable_pub)]
#![forbid(unsafe_code)]

mod builder;
mod config;
mod context;
mod error;
mod field;
mod global;
mod level;
mod logger;

pub mod engine;

#[cfg(any(feature = "log-compat", feature = "tracing-compat"))]
pub mod compat;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use builder::{LoggerBuilder, new, new_child_logger};
pub use config::{LoggerConfig, LoggerConfigBuilder};
pub use context::Context;
pub use engine::{Engine, FatalAction};
pub use error::{Error, Result};
pub use field::{ERROR_KEY, ERROR_SEPARATOR, Field, FieldValue, flatten_error_message};
pub use global::{
    debug, default_logger, error, fatal, info, reset_default_logger, set_default_logger, warn,
};
pub use level::{Level, disabled_level};
pub use logger::{EngineLogger, Logger, NoOpLogger, SharedLogger, noop};

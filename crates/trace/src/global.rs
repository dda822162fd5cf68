//! Process-wide default logger
//!
//! The slot starts out holding the no-op logger and never holds nothing.
//! Crate-level functions and macros read it at call time, so a logger
//! installed later is picked up by code that logged before.

use crate::field::Field;
use crate::level::Level;
use crate::logger::{Logger, SharedLogger, noop};
use parking_lot::RwLock;
use std::sync::LazyLock;

static DEFAULT_LOGGER: LazyLock<RwLock<SharedLogger>> = LazyLock::new(|| RwLock::new(noop()));

/// Replace the default logger. `None` resets it to the no-op logger.
pub fn set_default_logger(logger: Option<SharedLogger>) {
    *DEFAULT_LOGGER.write() = logger.unwrap_or_else(noop);
}

/// Reset the default logger to the no-op logger
pub fn reset_default_logger() {
    set_default_logger(None);
}

/// The current default logger
pub fn default_logger() -> SharedLogger {
    DEFAULT_LOGGER.read().clone()
}

/// Log at debug level through the default logger
pub fn debug(msg: &str, fields: &[Field]) {
    default_logger().log(Level::Debug, msg, fields);
}

/// Log at info level through the default logger
pub fn info(msg: &str, fields: &[Field]) {
    default_logger().log(Level::Info, msg, fields);
}

/// Log at warn level through the default logger
pub fn warn(msg: &str, fields: &[Field]) {
    default_logger().log(Level::Warn, msg, fields);
}

/// Log at error level through the default logger
pub fn error(msg: &str, fields: &[Field]) {
    default_logger().log(Level::Error, msg, fields);
}

/// Log at fatal level through the default logger, then run its fatal action
pub fn fatal(msg: &str, fields: &[Field]) {
    default_logger().log(Level::Fatal, msg, fields);
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, $fmt:literal $(, $arg:expr)* $(; $($field:expr),+)?) => {{
        let level = $level;
        let logger = $crate::default_logger();
        // Fatal always reaches the logger so its fatal action runs
        if level == $crate::Level::Fatal || $crate::Logger::enabled(&*logger, level) {
            $crate::Logger::log(
                &*logger,
                level,
                &::std::format!($fmt $(, $arg)*),
                &[$($($field),+)?],
            );
        }
    }};
}

/// Log a formatted message at debug level through the default logger.
///
/// Fields follow the format arguments after a `;`. Nothing is formatted
/// when the level is disabled.
///
/// ```
/// use proven_trace::Field;
///
/// let peer = "10.0.0.7";
/// proven_trace::debug!("dialing {peer}");
/// proven_trace::debug!("retry {} of {}", 2, 5; Field::str("peer", peer));
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(; $($field:expr),+ $(,)?)?) => {
        $crate::__log!($crate::Level::Debug, $fmt $(, $arg)* $(; $($field),+)?)
    };
}

/// Log a formatted message at info level through the default logger
#[macro_export]
macro_rules! info {
    ($fmt:literal $(, $arg:expr)* $(; $($field:expr),+ $(,)?)?) => {
        $crate::__log!($crate::Level::Info, $fmt $(, $arg)* $(; $($field),+)?)
    };
}

/// Log a formatted message at warn level through the default logger
#[macro_export]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(; $($field:expr),+ $(,)?)?) => {
        $crate::__log!($crate::Level::Warn, $fmt $(, $arg)* $(; $($field),+)?)
    };
}

/// Log a formatted message at error level through the default logger
#[macro_export]
macro_rules! error {
    ($fmt:literal $(, $arg:expr)* $(; $($field:expr),+ $(,)?)?) => {
        $crate::__log!($crate::Level::Error, $fmt $(, $arg)* $(; $($field),+)?)
    };
}

/// Log a formatted message at fatal level through the default logger, then
/// run its fatal action
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $(, $arg:expr)* $(; $($field:expr),+ $(,)?)?) => {
        $crate::__log!($crate::Level::Fatal, $fmt $(, $arg)* $(; $($field),+)?)
    };
}

//! Request-scoped context carrying a logger

use crate::logger::{SharedLogger, noop};

/// Explicit request-scoped value that can carry a logger.
///
/// Deriving a context never changes the one it came from.
///
/// ```
/// use proven_trace::{Context, Level, Logger};
///
/// let ctx = Context::new();
/// assert!(!ctx.logger().enabled(Level::Error));
///
/// let logger = proven_trace::new(Level::Info, "req", None);
/// let scoped = ctx.with_logger(logger);
/// assert!(scoped.logger().enabled(Level::Info));
/// assert!(!ctx.logger().enabled(Level::Info));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    logger: Option<SharedLogger>,
}

impl Context {
    /// Context with no logger attached
    pub const fn new() -> Self {
        Self { logger: None }
    }

    /// Derive a context carrying `logger`
    #[must_use]
    pub fn with_logger(&self, logger: SharedLogger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    /// The attached logger, or the no-op logger if none is attached or the
    /// attached one has no engine
    pub fn logger(&self) -> SharedLogger {
        match &self.logger {
            Some(logger) if logger.engine().is_some() => logger.clone(),
            _ => noop(),
        }
    }

    /// Whether a logger has been attached
    pub const fn has_logger(&self) -> bool {
        self.logger.is_some()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("has_logger", &self.has_logger())
            .finish()
    }
}

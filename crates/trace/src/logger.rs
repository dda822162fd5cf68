//! Logger trait and its two implementations

use crate::engine::Engine;
use crate::field::Field;
use crate::level::Level;
use std::sync::{Arc, LazyLock};

/// Shared handle to any logger
pub type SharedLogger = Arc<dyn Logger>;

/// Leveled, structured logging interface.
///
/// Implementations never fail: a call either writes a record or is
/// silently dropped.
pub trait Logger: Send + Sync + 'static {
    /// Write a record at `level` with `fields`
    fn log(&self, level: Level, msg: &str, fields: &[Field]);

    /// Check if a level is enabled (for fast filtering)
    fn enabled(&self, level: Level) -> bool;

    /// Child logger that attaches `fields` to every record.
    ///
    /// The receiver is unaffected.
    fn with(&self, fields: &[Field]) -> SharedLogger;

    /// Child logger with `name` appended to this logger's name.
    ///
    /// The receiver is unaffected.
    fn named(&self, name: &str) -> SharedLogger;

    /// The underlying engine, for code that needs engine-level features
    fn engine(&self) -> Option<&Engine>;

    /// Flush any buffered logs
    fn flush(&self);

    /// Log at debug level
    #[inline(always)]
    fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    /// Log at info level
    #[inline(always)]
    fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    /// Log at warn level
    #[inline(always)]
    fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    /// Log at error level
    #[inline(always)]
    fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at fatal level, then terminate according to the engine's
    /// [`FatalAction`](crate::FatalAction). Treat as non-returning.
    #[inline(always)]
    fn fatal(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Fatal, msg, fields);
    }
}

impl std::fmt::Debug for dyn Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Logger")
    }
}

static NOOP: LazyLock<SharedLogger> = LazyLock::new(|| Arc::new(NoOpLogger));

/// The shared no-op logger
pub fn noop() -> SharedLogger {
    NOOP.clone()
}

/// Logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline(always)]
    fn log(&self, _level: Level, _msg: &str, _fields: &[Field]) {}

    #[inline(always)]
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn with(&self, _fields: &[Field]) -> SharedLogger {
        noop()
    }

    fn named(&self, _name: &str) -> SharedLogger {
        noop()
    }

    fn engine(&self) -> Option<&Engine> {
        Some(Engine::nop())
    }

    fn flush(&self) {}
}

/// Logger that forwards to an [`Engine`].
///
/// `EngineLogger::default()` has no engine; every call on it is skipped.
#[derive(Debug, Clone, Default)]
pub struct EngineLogger {
    engine: Option<Engine>,
}

impl EngineLogger {
    /// Wrap `engine`
    pub const fn new(engine: Engine) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Wrap `engine` as a shared handle
    pub fn shared(engine: Engine) -> SharedLogger {
        Arc::new(Self::new(engine))
    }
}

impl Logger for EngineLogger {
    fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        if let Some(engine) = &self.engine {
            engine.log(level, msg, fields);
        }
    }

    #[inline(always)]
    fn enabled(&self, level: Level) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|engine| engine.enabled(level))
    }

    fn with(&self, fields: &[Field]) -> SharedLogger {
        Arc::new(Self {
            engine: self.engine.as_ref().map(|engine| engine.with(fields)),
        })
    }

    fn named(&self, name: &str) -> SharedLogger {
        Arc::new(Self {
            engine: self.engine.as_ref().map(|engine| engine.named(name)),
        })
    }

    fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    fn flush(&self) {
        if let Some(engine) = &self.engine {
            engine.sync();
        }
    }
}

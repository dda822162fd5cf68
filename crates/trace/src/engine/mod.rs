//! The structured logging engine behind the facade
//!
//! An [`Engine`] is a cheap, cloneable handle: a shared [`Core`] (level
//! filter, encoder and sinks), an optional dotted name, fields attached to
//! every record, and what to do after a fatal record.

mod core;
mod encoder;
mod sink;

pub use self::core::{Core, IoCore, NopCore, Tee};
pub use encoder::{ConsoleEncoder, DEFAULT_TIME_FORMAT, is_valid_time_format};
pub use sink::Sink;

use crate::field::Field;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A record as handed to a [`Core`]
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Severity
    pub level: Level,
    /// When the record was created
    pub time: DateTime<Local>,
    /// Dotted logger name, if any
    pub name: Option<&'a str>,
    /// The log message
    pub message: &'a str,
    /// Fields attached to the logger the record came from
    pub context: &'a [Field],
}

/// What happens after a fatal record has been written and flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalAction {
    /// Terminate the process with this exit code
    Exit(i32),
    /// Panic with the record's message
    Panic,
    /// Return to the caller. Only for inert engines.
    Ignore,
}

impl Default for FatalAction {
    fn default() -> Self {
        Self::Exit(1)
    }
}

static NOP_ENGINE: LazyLock<Engine> = LazyLock::new(|| Engine {
    core: Arc::new(NopCore),
    name: None,
    context: Arc::from(Vec::new()),
    on_fatal: FatalAction::Ignore,
});

/// Handle to a configured engine
#[derive(Clone)]
pub struct Engine {
    core: Arc<dyn Core>,
    name: Option<Arc<str>>,
    context: Arc<[Field]>,
    on_fatal: FatalAction,
}

impl Engine {
    /// Engine writing through `core`
    pub fn new(core: Arc<dyn Core>) -> Self {
        Self {
            core,
            name: None,
            context: Arc::from(Vec::new()),
            on_fatal: FatalAction::default(),
        }
    }

    /// Shared inert engine: never enabled, never writes, never terminates
    pub fn nop() -> &'static Self {
        &NOP_ENGINE
    }

    /// Replace the fatal action
    #[must_use]
    pub fn with_fatal_action(mut self, action: FatalAction) -> Self {
        self.on_fatal = action;
        self
    }

    /// Child engine with `segment` appended to the name.
    ///
    /// Segments are joined with `.`; an empty segment leaves the name as is.
    #[must_use]
    pub fn named(&self, segment: &str) -> Self {
        if segment.is_empty() {
            return self.clone();
        }

        let name = match &self.name {
            Some(parent) => format!("{parent}.{segment}"),
            None => segment.to_string(),
        };

        Self {
            name: Some(Arc::from(name)),
            ..self.clone()
        }
    }

    /// Child engine that attaches `fields` to every record
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        if fields.is_empty() {
            return self.clone();
        }

        let context: Vec<Field> = self.context.iter().chain(fields).cloned().collect();
        Self {
            context: Arc::from(context),
            ..self.clone()
        }
    }

    /// Dotted name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields attached to every record
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Configured fatal action
    pub const fn fatal_action(&self) -> FatalAction {
        self.on_fatal
    }

    /// Whether a record at `level` would be written
    #[inline(always)]
    pub fn enabled(&self, level: Level) -> bool {
        self.core.enabled(level)
    }

    /// Write a record if `level` is enabled.
    ///
    /// A fatal record runs the fatal action after writing and flushing, even
    /// when the level filter dropped the record.
    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if self.core.enabled(level) {
            let entry = Entry {
                level,
                time: Local::now(),
                name: self.name(),
                message,
                context: &self.context,
            };

            if let Err(e) = self.core.write(&entry, fields) {
                report_internal_error("write", &e);
            }
        }

        if level == Level::Fatal {
            self.terminate(message);
        }
    }

    /// Flush every sink
    pub fn sync(&self) {
        if let Err(e) = self.core.sync() {
            report_internal_error("sync", &e);
        }
    }

    fn terminate(&self, message: &str) {
        match self.on_fatal {
            FatalAction::Exit(code) => {
                self.sync();
                std::process::exit(code);
            }
            FatalAction::Panic => {
                self.sync();
                panic!("{message}");
            }
            FatalAction::Ignore => {}
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("on_fatal", &self.on_fatal)
            .finish_non_exhaustive()
    }
}

/// Sink failures go to stderr; logging calls never surface them.
pub(crate) fn report_internal_error(op: &str, err: &dyn fmt::Display) {
    eprintln!("{} {op} error: {err}", Local::now().format(DEFAULT_TIME_FORMAT));
}

//! Constructing loggers over stdout, files and custom sinks

use crate::engine::{
    ConsoleEncoder, Core, DEFAULT_TIME_FORMAT, Engine, FatalAction, IoCore, Sink, Tee,
};
use crate::level::Level;
use crate::logger::{EngineLogger, SharedLogger, noop};
use std::borrow::Cow;
use std::fs::File;
use std::sync::Arc;

/// Build a logger writing to stdout and, when given, to `log_file` as well.
///
/// Records below `level` are dropped. A non-empty `prefix` becomes the
/// logger's name; an empty one leaves the name column out entirely.
///
/// ```no_run
/// use proven_trace::{Field, Level, Logger};
///
/// let logger = proven_trace::new(Level::Info, "api", None);
/// logger.info("listening", &[Field::int("port", 8080)]);
/// ```
pub fn new(level: Level, prefix: &str, log_file: Option<File>) -> SharedLogger {
    let mut builder = LoggerBuilder::new(level).name(prefix);
    if let Some(file) = log_file {
        builder = builder.file(file);
    }
    builder.build()
}

/// Derive a named logger from `parent`'s engine.
///
/// Without a parent, or with a parent that has no engine, the result is the
/// no-op logger. An empty `prefix` keeps the parent's name.
pub fn new_child_logger(parent: Option<&SharedLogger>, prefix: &str) -> SharedLogger {
    let Some(engine) = parent.and_then(|parent| parent.engine()) else {
        return noop();
    };

    EngineLogger::shared(engine.named(prefix))
}

/// Builder for engine-backed loggers.
///
/// Every record goes to the primary sink (stdout unless replaced) and to each
/// additional sink. All sinks share the encoder settings and minimum level.
#[derive(Debug)]
pub struct LoggerBuilder {
    level: Level,
    name: String,
    stdout: Sink,
    extra: Vec<Sink>,
    color: bool,
    time_format: Cow<'static, str>,
    fatal_action: FatalAction,
}

impl LoggerBuilder {
    /// Start a builder filtering below `level`
    pub fn new(level: Level) -> Self {
        Self {
            level,
            name: String::new(),
            stdout: Sink::stdout(),
            extra: Vec::new(),
            color: true,
            time_format: Cow::Borrowed(DEFAULT_TIME_FORMAT),
            fatal_action: FatalAction::default(),
        }
    }

    /// Logger name; empty means unnamed
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Also write every record to `file`
    #[must_use]
    pub fn file(self, file: File) -> Self {
        self.sink(Sink::file(file))
    }

    /// Replace the primary (stdout) sink
    #[must_use]
    pub fn stdout(mut self, sink: Sink) -> Self {
        self.stdout = sink;
        self
    }

    /// Add a further fan-out sink
    #[must_use]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.extra.push(sink);
        self
    }

    /// Colourise the level column
    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// `chrono` strftime layout for timestamps. An unparsable layout falls
    /// back to [`DEFAULT_TIME_FORMAT`].
    #[must_use]
    pub fn time_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        self.time_format = format.into();
        self
    }

    /// What to do after a fatal record
    #[must_use]
    pub const fn fatal_action(mut self, action: FatalAction) -> Self {
        self.fatal_action = action;
        self
    }

    /// Build the engine without wrapping it in a logger
    pub fn build_engine(self) -> Engine {
        let encoder = ConsoleEncoder::new()
            .with_color(self.color)
            .with_time_format(self.time_format);

        let primary: Arc<dyn Core> =
            Arc::new(IoCore::new(encoder.clone(), self.stdout, self.level));
        let core: Arc<dyn Core> = if self.extra.is_empty() {
            primary
        } else {
            let mut cores = Vec::with_capacity(self.extra.len() + 1);
            cores.push(primary);
            for sink in self.extra {
                let core: Arc<dyn Core> = Arc::new(IoCore::new(encoder.clone(), sink, self.level));
                cores.push(core);
            }
            Arc::new(Tee::new(cores))
        };

        Engine::new(core)
            .with_fatal_action(self.fatal_action)
            .named(&self.name)
    }

    /// Build the logger
    pub fn build(self) -> SharedLogger {
        EngineLogger::shared(self.build_engine())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::logger::Logger;
    use parking_lot::Mutex;
    use std::io::{self, Write};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn builder(level: Level, out: &Buffer) -> LoggerBuilder {
        LoggerBuilder::new(level)
            .stdout(Sink::new(out.clone()))
            .color(false)
            .fatal_action(FatalAction::Panic)
    }

    #[test]
    fn test_unnamed_logger_has_no_name_column() {
        let out = Buffer::default();
        let logger = builder(Level::Info, &out).build();
        logger.info("hello", &[]);

        let text = out.text();
        let columns: Vec<&str> = text.trim_end().split('\t').collect();
        assert_eq!(columns.len(), 3, "unexpected columns: {columns:?}");
        assert_eq!(columns[1], "INFO");
        assert_eq!(columns[2], "hello");
    }

    #[test]
    fn test_prefix_names_logger() {
        let out = Buffer::default();
        let logger = builder(Level::Info, &out).name("api").build();
        logger.warn("slow", &[]);
        assert!(out.text().contains("\tWARN\tapi\tslow\n"));
    }

    #[test]
    fn test_fan_out_to_extra_sinks() {
        let out = Buffer::default();
        let extra = Buffer::default();
        let logger = builder(Level::Debug, &out)
            .sink(Sink::new(extra.clone()))
            .build();

        logger.debug("both", &[Field::int("n", 1)]);
        assert_eq!(out.text(), extra.text());
        assert!(extra.text().contains("both\t{\"n\": 1}"));
    }

    #[test]
    fn test_disabled_level_emits_nothing() {
        let out = Buffer::default();
        let logger = builder(crate::disabled_level(), &out).build();
        for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert!(!logger.enabled(level));
            logger.log(level, "never", &[]);
        }
        assert!(out.text().is_empty());
    }

    #[test]
    fn test_child_logger_extends_name() {
        let out = Buffer::default();
        let parent = builder(Level::Info, &out).name("app").build();

        let child = new_child_logger(Some(&parent), "db");
        child.info("query", &[]);
        assert!(out.text().contains("\tINFO\tapp.db\tquery\n"));

        let same = new_child_logger(Some(&parent), "");
        assert_eq!(same.engine().and_then(Engine::name), Some("app"));
    }

    #[test]
    fn test_child_of_nothing_is_silent() {
        let child = new_child_logger(None, "x");
        assert!(!child.enabled(Level::Fatal));

        let engine_less: SharedLogger = Arc::new(EngineLogger::default());
        let child = new_child_logger(Some(&engine_less), "x");
        assert!(!child.enabled(Level::Fatal));
        // The no-op logger, not a copy of the engine-less one
        assert!(child.engine().is_some());
    }
}

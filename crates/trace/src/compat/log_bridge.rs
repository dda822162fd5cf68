//! Bridge from the `log` crate to facade loggers

use crate::engine::report_internal_error;
use crate::field::Field;
use crate::level::Level;
use crate::logger::SharedLogger;
use log::kv::{self, Key, Value, VisitSource};
use log::{LevelFilter, Log, Metadata, Record};

/// Implements `log::Log` by forwarding to a facade logger.
///
/// Structured key/values on a record are converted to typed fields.
pub struct LogBridge {
    logger: SharedLogger,
}

impl LogBridge {
    /// Create a new log bridge
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }

    /// Most verbose `log` filter the wrapped logger will accept
    pub fn max_level(&self) -> LevelFilter {
        if self.logger.enabled(Level::Debug) {
            // Trace folds into debug
            LevelFilter::Trace
        } else if self.logger.enabled(Level::Info) {
            LevelFilter::Info
        } else if self.logger.enabled(Level::Warn) {
            LevelFilter::Warn
        } else if self.logger.enabled(Level::Error) {
            LevelFilter::Error
        } else {
            LevelFilter::Off
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger.enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut visitor = KvVisitor::default();
        // A failing source only loses its remaining pairs
        if let Err(err) = record.key_values().visit(&mut visitor) {
            report_internal_error("key-value", &err);
        }

        self.logger.log(
            Level::from(record.level()),
            &record.args().to_string(),
            &visitor.fields,
        );
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

#[derive(Default)]
struct KvVisitor {
    fields: Vec<Field>,
}

impl<'kvs> VisitSource<'kvs> for KvVisitor {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        let key = key.as_str().to_string();
        let field = if let Some(b) = value.to_bool() {
            Field::bool(key, b)
        } else if let Some(i) = value.to_i64() {
            Field::int(key, i)
        } else if let Some(s) = value.to_borrowed_str() {
            Field::str(key, s)
        } else {
            Field::str(key, value.to_string())
        };
        self.fields.push(field);
        Ok(())
    }
}

/// Install `logger` as the `log` crate's global logger.
///
/// # Example
/// ```no_run
/// use proven_trace::{Level, compat::init_log_bridge};
///
/// let logger = proven_trace::new(Level::Info, "app", None);
/// init_log_bridge(logger).expect("Failed to set log bridge");
///
/// log::info!("ready");
/// ```
pub fn init_log_bridge(logger: SharedLogger) -> crate::Result<()> {
    let bridge = LogBridge::new(logger);
    let max_level = bridge.max_level();

    // log::set_logger needs a 'static reference
    log::set_logger(Box::leak(Box::new(bridge)))?;
    log::set_max_level(max_level);

    Ok(())
}

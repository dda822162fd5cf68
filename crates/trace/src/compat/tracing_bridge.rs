//! Bridge from `tracing` to facade loggers

use crate::field::{Field, flatten_error_message};
use crate::level::Level;
use crate::logger::SharedLogger;
use std::fmt;
use std::marker::PhantomData;
use tracing::field::Visit;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// A tracing layer that forwards events to a facade logger.
///
/// The event's `message` becomes the record message, prefixed with the names
/// of the enclosing spans (`outer::inner: message`). Every other event field
/// becomes a typed [`Field`].
pub struct TracingBridge<S = Registry> {
    logger: SharedLogger,
    _subscriber: PhantomData<fn(S)>,
}

impl<S> TracingBridge<S> {
    /// Create a new tracing bridge
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            logger,
            _subscriber: PhantomData,
        }
    }
}

impl<S> Layer<S> for TracingBridge<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let level = Level::from(*event.metadata().level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let spans: Vec<&str> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();

        let message = if spans.is_empty() {
            visitor.message
        } else {
            format!("{}: {}", spans.join("::"), visitor.message)
        };

        self.logger.log(level, &message, &visitor.fields);
    }
}

/// Collects the message and converts the remaining fields
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(Field::str(field.name(), value));
        }
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.push(Field::int(field.name(), value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        let field = match i64::try_from(value) {
            Ok(value) => Field::int(field.name(), value),
            Err(_) => Field::str(field.name(), value.to_string()),
        };
        self.fields.push(field);
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields.push(Field::bool(field.name(), value));
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.fields
            .push(Field::str(field.name(), flatten_error_message(&value.to_string())));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(Field::str(field.name(), format!("{value:?}")));
        }
    }
}

/// Install a global `tracing` subscriber that forwards to `logger`.
///
/// # Example
/// ```no_run
/// use proven_trace::{Level, compat::init_tracing_bridge};
///
/// let logger = proven_trace::new(Level::Info, "app", None);
/// init_tracing_bridge(logger).expect("Failed to set tracing bridge");
///
/// tracing::info!(peer = "10.0.0.7", "connected");
/// ```
pub fn init_tracing_bridge(logger: SharedLogger) -> crate::Result<()> {
    use tracing_subscriber::layer::SubscriberExt;

    let subscriber = tracing_subscriber::registry().with(TracingBridge::new(logger));
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

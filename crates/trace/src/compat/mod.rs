//! Compatibility bridges for other logging crates

#[cfg(feature = "log-compat")]
pub mod log_bridge;

#[cfg(feature = "tracing-compat")]
pub mod tracing_bridge;

#[cfg(feature = "log-compat")]
pub use log_bridge::{LogBridge, init_log_bridge};

#[cfg(feature = "tracing-compat")]
pub use tracing_bridge::{TracingBridge, init_tracing_bridge};

/// Route both `log` records and `tracing` events into `logger`.
///
/// Installs process-wide hooks, so it can only succeed once per process.
#[cfg(all(feature = "log-compat", feature = "tracing-compat"))]
pub fn init_with_bridges(logger: crate::SharedLogger) -> crate::Result<()> {
    init_log_bridge(logger.clone())?;
    init_tracing_bridge(logger)?;
    Ok(())
}

//! Test support utilities
//!
//! Utilities for capturing logs during tests. Only available with the
//! `test-support` feature.

use crate::builder::LoggerBuilder;
use crate::engine::{FatalAction, Sink};
use crate::global::{default_logger, set_default_logger};
use crate::level::Level;
use crate::logger::SharedLogger;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Shared in-memory writer. Clones see the same contents.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written records, one per line
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    /// Check if the captured output contains `text`
    pub fn contains(&self, text: &str) -> bool {
        self.contents().contains(text)
    }

    /// Clear captured output
    pub fn clear(&self) {
        self.bytes.lock().clear();
    }

    /// A sink writing into this buffer
    pub fn sink(&self) -> Sink {
        Sink::new(self.clone())
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A logger writing uncoloured records into a [`CaptureBuffer`].
///
/// `fatal` panics instead of exiting, so it can be observed with
/// `#[should_panic]`.
pub fn capture_logger(level: Level) -> (SharedLogger, CaptureBuffer) {
    let buffer = CaptureBuffer::new();
    let logger = LoggerBuilder::new(level)
        .stdout(buffer.sink())
        .color(false)
        .fatal_action(FatalAction::Panic)
        .build();
    (logger, buffer)
}

/// Installs a capture logger as the default for the guard's lifetime.
///
/// The previous default is restored on drop. If the test is panicking, the
/// captured logs are printed to stderr first.
pub struct TestLogGuard {
    buffer: CaptureBuffer,
    logger: SharedLogger,
    previous: SharedLogger,
    test_name: String,
    printed: bool,
}

impl TestLogGuard {
    /// Capture everything from debug up
    pub fn new(test_name: impl Into<String>) -> Self {
        Self::with_level(test_name, Level::Debug)
    }

    /// Capture records at or above `level`
    pub fn with_level(test_name: impl Into<String>, level: Level) -> Self {
        let (logger, buffer) = capture_logger(level);
        let previous = default_logger();
        set_default_logger(Some(logger.clone()));

        Self {
            buffer,
            logger,
            previous,
            test_name: test_name.into(),
            printed: false,
        }
    }

    /// Mark that the test passed (logs won't be printed)
    pub fn passed(&mut self) {
        self.printed = true;
    }

    /// The installed capture logger
    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// The buffer the capture logger writes to
    pub fn buffer(&self) -> &CaptureBuffer {
        &self.buffer
    }
}

impl Drop for TestLogGuard {
    fn drop(&mut self) {
        if !self.printed && std::thread::panicking() {
            let logs = self.buffer.contents();
            if !logs.is_empty() {
                eprintln!("\n===== Logs from failed test '{}' =====", self.test_name);
                eprint!("{logs}");
                eprintln!("===== End of logs =====\n");
            }
        }

        set_default_logger(Some(self.previous.clone()));
    }
}

//! Mutex-guarded output streams

use parking_lot::Mutex;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;

/// A destination that encoded records are written to.
///
/// Every write happens under the sink's lock with a single `write_all`, so
/// records from concurrent threads never interleave. Clones share the same
/// underlying writer.
#[derive(Clone)]
pub struct Sink {
    label: &'static str,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    /// Wrap an arbitrary writer
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::labelled("writer", writer)
    }

    fn labelled<W>(label: &'static str, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            label,
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Process standard output
    pub fn stdout() -> Self {
        Self::labelled("stdout", io::stdout())
    }

    /// Process standard error
    pub fn stderr() -> Self {
        Self::labelled("stderr", io::stderr())
    }

    /// An open file. Writes go straight to the file without extra buffering.
    pub fn file(file: File) -> Self {
        Self::labelled("file", file)
    }

    /// Write one complete record
    pub fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        self.writer.lock().write_all(buf)
    }

    /// Flush the underlying writer
    pub fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("label", &self.label).finish()
    }
}

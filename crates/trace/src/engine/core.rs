//! Cores: a level filter and an encoder bound to one or more sinks

use super::{ConsoleEncoder, Entry, Sink};
use crate::field::Field;
use crate::level::Level;
use std::io;
use std::sync::Arc;

/// The unit of output inside an [`Engine`](super::Engine).
pub trait Core: Send + Sync + 'static {
    /// Whether a record at `level` would be written
    fn enabled(&self, level: Level) -> bool;

    /// Encode and write a record. Callers check [`Core::enabled`] first.
    fn write(&self, entry: &Entry<'_>, fields: &[Field]) -> io::Result<()>;

    /// Flush buffered output
    fn sync(&self) -> io::Result<()>;
}

/// Writes records at or above a minimum level to a single sink
#[derive(Debug, Clone)]
pub struct IoCore {
    encoder: ConsoleEncoder,
    sink: Sink,
    min_level: Level,
}

impl IoCore {
    /// Create a core for `sink` filtering below `min_level`
    pub const fn new(encoder: ConsoleEncoder, sink: Sink, min_level: Level) -> Self {
        Self {
            encoder,
            sink,
            min_level,
        }
    }
}

impl Core for IoCore {
    #[inline(always)]
    fn enabled(&self, level: Level) -> bool {
        level.passes(self.min_level)
    }

    fn write(&self, entry: &Entry<'_>, fields: &[Field]) -> io::Result<()> {
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(entry, fields, &mut buf)?;
        self.sink.write_record(&buf)
    }

    fn sync(&self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Fans every record out to several cores.
///
/// A failure in one core does not stop the others from being written; the
/// first error is returned once every core has been tried.
#[derive(Clone)]
pub struct Tee {
    cores: Vec<Arc<dyn Core>>,
}

impl Tee {
    /// Combine `cores` into one
    pub fn new(cores: Vec<Arc<dyn Core>>) -> Self {
        Self { cores }
    }
}

impl Core for Tee {
    fn enabled(&self, level: Level) -> bool {
        self.cores.iter().any(|core| core.enabled(level))
    }

    fn write(&self, entry: &Entry<'_>, fields: &[Field]) -> io::Result<()> {
        let mut first_err = None;
        for core in &self.cores {
            if !core.enabled(entry.level) {
                continue;
            }
            if let Err(e) = core.write(entry, fields) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn sync(&self) -> io::Result<()> {
        let mut first_err = None;
        for core in &self.cores {
            if let Err(e) = core.sync() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// Core that is never enabled and writes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NopCore;

impl Core for NopCore {
    #[inline(always)]
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn write(&self, _entry: &Entry<'_>, _fields: &[Field]) -> io::Result<()> {
        Ok(())
    }

    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use parking_lot::Mutex;
    use std::io::Write;

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

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn entry(level: Level) -> Entry<'static> {
        Entry {
            level,
            time: Local::now(),
            name: None,
            message: "tee test",
            context: &[],
        }
    }

    fn core(sink: Sink, min_level: Level) -> Arc<dyn Core> {
        Arc::new(IoCore::new(
            ConsoleEncoder::new().with_color(false),
            sink,
            min_level,
        ))
    }

    #[test]
    fn test_io_core_filters() {
        let buf = Buffer::default();
        let core = IoCore::new(
            ConsoleEncoder::new().with_color(false),
            Sink::new(buf.clone()),
            Level::Warn,
        );
        assert!(!core.enabled(Level::Info));
        assert!(core.enabled(Level::Warn));
        assert!(core.enabled(Level::Fatal));

        core.write(&entry(Level::Warn), &[]).unwrap();
        assert!(buf.text().contains("WARN\ttee test"));
    }

    #[test]
    fn test_tee_writes_to_every_core() {
        let a = Buffer::default();
        let b = Buffer::default();
        let tee = Tee::new(vec![
            core(Sink::new(a.clone()), Level::Info),
            core(Sink::new(b.clone()), Level::Info),
        ]);

        tee.write(&entry(Level::Error), &[]).unwrap();
        assert!(a.text().contains("tee test"));
        assert!(b.text().contains("tee test"));
    }

    #[test]
    fn test_tee_continues_past_failing_core() {
        let good = Buffer::default();
        let tee = Tee::new(vec![
            core(Sink::new(Broken), Level::Info),
            core(Sink::new(good.clone()), Level::Info),
        ]);

        let err = tee.write(&entry(Level::Info), &[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(good.text().contains("tee test"));
        assert!(tee.sync().is_err());
    }

    #[test]
    fn test_tee_respects_each_core_level() {
        let verbose = Buffer::default();
        let quiet = Buffer::default();
        let tee = Tee::new(vec![
            core(Sink::new(verbose.clone()), Level::Debug),
            core(Sink::new(quiet.clone()), Level::Error),
        ]);

        assert!(tee.enabled(Level::Debug));
        tee.write(&entry(Level::Debug), &[]).unwrap();
        assert!(verbose.text().contains("DEBUG"));
        assert!(quiet.text().is_empty());
    }

    #[test]
    fn test_nop_core() {
        for level in Level::EMITTABLE {
            assert!(!NopCore.enabled(level));
        }
        assert!(NopCore.write(&entry(Level::Error), &[]).is_ok());
    }
}

//! Console encoder
//!
//! Renders one record per line:
//!
//! ```text
//! 2024-05-01 12:00:00	INFO	app.http	request served	{"path": "/", "status": 200}
//! ```
//!
//! Columns are tab separated. The name column only appears for named
//! loggers and the field object only when the record carries fields.

use super::Entry;
use crate::field::{Field, FieldValue};
use crate::level::Level;
use chrono::format::{Item, StrftimeItems};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{self, Write};
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Default timestamp layout (local time)
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable, line-oriented encoder
#[derive(Debug, Clone)]
pub struct ConsoleEncoder {
    time_format: Cow<'static, str>,
    color: bool,
}

impl ConsoleEncoder {
    /// Encoder with coloured level names and the default timestamp layout
    pub const fn new() -> Self {
        Self {
            time_format: Cow::Borrowed(DEFAULT_TIME_FORMAT),
            color: true,
        }
    }

    /// Enable or disable ANSI colouring of the level column
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Use a `chrono` strftime layout for the timestamp column.
    ///
    /// A layout that chrono cannot parse is replaced by
    /// [`DEFAULT_TIME_FORMAT`].
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<Cow<'static, str>>) -> Self {
        let format = format.into();
        self.time_format = if is_valid_time_format(&format) {
            format
        } else {
            Cow::Borrowed(DEFAULT_TIME_FORMAT)
        };
        self
    }

    /// Encode a record, including the trailing newline, into `buf`
    pub fn encode(&self, entry: &Entry<'_>, fields: &[Field], buf: &mut Vec<u8>) -> io::Result<()> {
        let mut ts = String::with_capacity(32);
        if write!(ts, "{}", entry.time.format(&self.time_format)).is_err() {
            ts.clear();
            let _ = write!(ts, "{}", entry.time.format(DEFAULT_TIME_FORMAT));
        }
        buf.extend_from_slice(ts.as_bytes());
        buf.push(b'\t');

        if self.color {
            let mut ansi = Ansi::new(&mut *buf);
            ansi.set_color(
                ColorSpec::new()
                    .set_fg(Some(level_color(entry.level)))
                    .set_bold(true),
            )?;
            ansi.write_all(entry.level.as_str().as_bytes())?;
            ansi.reset()?;
        } else {
            buf.extend_from_slice(entry.level.as_str().as_bytes());
        }
        buf.push(b'\t');

        if let Some(name) = entry.name.filter(|name| !name.is_empty()) {
            buf.extend_from_slice(name.as_bytes());
            buf.push(b'\t');
        }

        buf.extend_from_slice(entry.message.as_bytes());

        if !entry.context.is_empty() || !fields.is_empty() {
            buf.extend_from_slice(b"\t{");
            for (i, field) in entry.context.iter().chain(fields).enumerate() {
                if i > 0 {
                    buf.extend_from_slice(b", ");
                }
                encode_field(field, buf)?;
            }
            buf.push(b'}');
        }

        buf.push(b'\n');
        Ok(())
    }
}

impl Default for ConsoleEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether chrono accepts every specifier in `format`
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn encode_field(field: &Field, buf: &mut Vec<u8>) -> io::Result<()> {
    serde_json::to_writer(&mut *buf, field.key())?;
    buf.extend_from_slice(b": ");
    match field.value() {
        FieldValue::Str(s) => serde_json::to_writer(&mut *buf, s)?,
        FieldValue::Int(i) => write!(buf, "{i}")?,
        FieldValue::Bool(b) => write!(buf, "{b}")?,
    }
    Ok(())
}

const fn level_color(level: Level) -> Color {
    match level {
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error | Level::Fatal => Color::Red,
        Level::Disabled => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn entry<'a>(
        level: Level,
        name: Option<&'a str>,
        message: &'a str,
        context: &'a [Field],
    ) -> Entry<'a> {
        Entry {
            level,
            time: Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            name,
            message,
            context,
        }
    }

    fn encode(encoder: &ConsoleEncoder, entry: &Entry<'_>, fields: &[Field]) -> String {
        let mut buf = Vec::new();
        encoder.encode(entry, fields, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_record() {
        let encoder = ConsoleEncoder::new().with_color(false);
        let line = encode(&encoder, &entry(Level::Info, None, "hello", &[]), &[]);
        assert_eq!(line, "2024-05-01 12:00:00\tINFO\thello\n");
    }

    #[test]
    fn test_named_record_with_fields() {
        let encoder = ConsoleEncoder::new().with_color(false);
        let context = [Field::str("component", "http")];
        let line = encode(
            &encoder,
            &entry(Level::Warn, Some("app.http"), "slow request", &context),
            &[Field::int("ms", 1500), Field::bool("retry", false)],
        );
        assert_eq!(
            line,
            "2024-05-01 12:00:00\tWARN\tapp.http\tslow request\t{\"component\": \"http\", \"ms\": 1500, \"retry\": false}\n"
        );
    }

    #[test]
    fn test_empty_name_has_no_column() {
        let encoder = ConsoleEncoder::new().with_color(false);
        let line = encode(&encoder, &entry(Level::Error, Some(""), "x", &[]), &[]);
        assert_eq!(line, "2024-05-01 12:00:00\tERROR\tx\n");
    }

    #[test]
    fn test_strings_are_quoted_and_escaped() {
        let encoder = ConsoleEncoder::new().with_color(false);
        let line = encode(
            &encoder,
            &entry(Level::Info, None, "m", &[]),
            &[Field::str("quote", "say \"hi\"\nnow"), Field::err(None)],
        );
        assert!(line.ends_with("{\"quote\": \"say \\\"hi\\\"\\nnow\", \"error\": \"\"}\n"));
        assert_eq!(line.lines().count(), 1);
    }

    #[test]
    fn test_color_wraps_level() {
        let encoder = ConsoleEncoder::new();
        let line = encode(&encoder, &entry(Level::Info, None, "m", &[]), &[]);
        assert!(line.contains("\x1b["));
        assert!(line.contains("INFO"));
        assert!(line.ends_with("\tm\n"));
    }

    #[test]
    fn test_invalid_time_format_falls_back() {
        assert!(is_valid_time_format(DEFAULT_TIME_FORMAT));
        assert!(!is_valid_time_format("%Q"));

        let encoder = ConsoleEncoder::new()
            .with_color(false)
            .with_time_format("%Q");
        let line = encode(&encoder, &entry(Level::Info, None, "m", &[]), &[]);
        assert_eq!(line, "2024-05-01 12:00:00\tINFO\tm\n");
    }

    #[test]
    fn test_custom_time_format() {
        let encoder = ConsoleEncoder::new()
            .with_color(false)
            .with_time_format("%H:%M");
        let line = encode(&encoder, &entry(Level::Debug, None, "m", &[]), &[]);
        assert_eq!(line, "12:00\tDEBUG\tm\n");
    }
}

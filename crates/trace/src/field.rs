//! Typed key/value fields attached to log records

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Key used by [`Field::err`] and [`Field::error_chain`]
pub const ERROR_KEY: &str = "error";

/// Replacement for line breaks and tabs inside rendered errors
pub const ERROR_SEPARATOR: &str = " | ";

/// A structured key/value pair attached to a log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    key: Cow<'static, str>,
    value: FieldValue,
}

/// The typed value carried by a [`Field`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value
    Str(String),
    /// A signed integer value
    Int(i64),
    /// A boolean value
    Bool(bool),
}

impl Field {
    /// String field
    pub fn str(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Str(value.into()),
        }
    }

    /// Integer field
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Int(value),
        }
    }

    /// Boolean field
    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self {
            key: key.into(),
            value: FieldValue::Bool(value),
        }
    }

    /// Error field keyed `"error"`.
    ///
    /// The error's message is rendered on a single line: every newline and
    /// tab becomes `" | "`. `None` renders as an empty string; the field is
    /// still present.
    ///
    /// ```
    /// use proven_trace::{Field, FieldValue};
    /// use std::io;
    ///
    /// let err = io::Error::other("dial failed\nconnection refused");
    /// let field = Field::err(Some(&err));
    /// assert_eq!(field.key(), "error");
    /// assert_eq!(
    ///     field.value(),
    ///     &FieldValue::Str("dial failed | connection refused".to_string())
    /// );
    ///
    /// assert_eq!(Field::err(None).value(), &FieldValue::Str(String::new()));
    /// ```
    pub fn err(error: Option<&dyn StdError>) -> Self {
        let rendered = error
            .map(|e| flatten_error_message(&e.to_string()))
            .unwrap_or_default();

        Self::str(ERROR_KEY, rendered)
    }

    /// Error field keyed `"error"` that also renders every `source()` in
    /// the chain, each on its own segment.
    pub fn error_chain(error: &dyn StdError) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push('\n');
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::str(ERROR_KEY, flatten_error_message(&message))
    }

    /// The field's key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The field's value
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }
}

/// Render a message on one line by replacing every `\n` and `\t` with
/// [`ERROR_SEPARATOR`].
///
/// Runs of line breaks are not collapsed: each one becomes a separator.
pub fn flatten_error_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for ch in message.chars() {
        match ch {
            '\n' | '\t' => out.push_str(ERROR_SEPARATOR),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct Wrapped {
        inner: io::Error,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "handle auth callback")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_constructors() {
        let f = Field::str("key", "value");
        assert_eq!(f.key(), "key");
        assert_eq!(f.value(), &FieldValue::Str("value".to_string()));

        let f = Field::int("count", 123);
        assert_eq!(f.value(), &FieldValue::Int(123));

        let f = Field::bool("ok", true);
        assert_eq!(f.value(), &FieldValue::Bool(true));

        // Owned keys work as well as static ones
        let key = format!("shard_{}", 3);
        assert_eq!(Field::int(key, 1).key(), "shard_3");
    }

    #[test]
    fn test_err_simple_message_unchanged() {
        let err = io::Error::other("simple error message");
        let f = Field::err(Some(&err));
        assert_eq!(f.key(), ERROR_KEY);
        assert_eq!(f.value().to_string(), "simple error message");
    }

    #[test]
    fn test_err_none_is_empty() {
        assert_eq!(Field::err(None), Field::str("error", ""));
    }

    #[test]
    fn test_flatten_whitespace() {
        let flat = flatten_error_message("error\nwith\n\nmultiple\n\n\nnewlines\tand\ttabs");
        assert!(!flat.contains('\n'));
        assert!(!flat.contains('\t'));
        assert_eq!(
            flat,
            "error | with |  | multiple |  |  | newlines | and | tabs"
        );
    }

    #[test]
    fn test_error_chain() {
        let err = Wrapped {
            inner: io::Error::other("TLS handshake timeout"),
        };
        let f = Field::error_chain(&err);
        assert_eq!(
            f.value().to_string(),
            "handle auth callback | TLS handshake timeout"
        );
    }
}

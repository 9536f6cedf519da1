//! Canonical error representation and payload normalization
//!
//! `error` and `fatal` calls accept anything convertible into an
//! [`ErrorPayload`]. Before dispatch the payload is normalized by
//! [`to_error`] into a [`StructuredError`], so handlers at those levels
//! always receive a structured error and never a raw value.
//!
//! Normalization never fails:
//! - an existing `StructuredError` is returned as is (same identity)
//! - a string becomes the message verbatim
//! - anything else is serialized to compact JSON with sorted keys, falling
//!   back to its `Debug` rendering when serialization fails

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use super::error::LoggerError;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

struct Inner {
    message: String,
    source: Option<BoxedSource>,
    backtrace: Backtrace,
}

/// Reference-counted error carrying a human-readable message
///
/// Clones share identity, which [`StructuredError::ptr_eq`] observes. A
/// backtrace is captured on construction (subject to `RUST_BACKTRACE`).
#[derive(Clone)]
pub struct StructuredError {
    inner: Arc<Inner>,
}

impl StructuredError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                message: message.into(),
                source: None,
                backtrace: Backtrace::capture(),
            }),
        }
    }

    /// Wrap an existing error, keeping it as the source
    pub fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    fn from_boxed(err: BoxedSource) -> Self {
        Self {
            inner: Arc::new(Inner {
                message: err.to_string(),
                source: Some(err),
                backtrace: Backtrace::capture(),
            }),
        }
    }

    pub fn message(&self) -> &str {
        &self.inner.message
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.inner.backtrace
    }

    /// True when both values are clones of the same error
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.message)
    }
}

impl fmt::Debug for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredError")
            .field("message", &self.inner.message)
            .field("source", &self.inner.source)
            .finish()
    }
}

impl StdError for StructuredError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl Serialize for StructuredError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.inner.source.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("message", &self.inner.message)?;
        if let Some(source) = &self.inner.source {
            map.serialize_entry("source", &source.to_string())?;
        }
        map.end()
    }
}

/// Anything an `error`/`fatal` call accepts, before normalization
#[derive(Debug, Clone)]
pub enum ErrorPayload {
    /// Already structured; passed through unchanged
    Error(StructuredError),
    /// Used verbatim as the message
    Message(String),
    /// Serialized to compact JSON
    Value(Value),
    /// Pre-rendered fallback text, used verbatim
    Rendered(String),
}

impl ErrorPayload {
    /// Best-effort conversion of an arbitrary serializable value
    ///
    /// Serialization failures (non-string map keys, failing `Serialize`
    /// impls) fall back to the value's `Debug` rendering.
    pub fn serialized<T>(value: &T) -> Self
    where
        T: Serialize + fmt::Debug + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(value) => ErrorPayload::Value(value),
            Err(_) => ErrorPayload::Rendered(format!("{:?}", value)),
        }
    }

    /// Normalize into a structured error
    pub fn into_error(self) -> StructuredError {
        match self {
            ErrorPayload::Error(err) => err,
            ErrorPayload::Message(message) | ErrorPayload::Rendered(message) => {
                StructuredError::new(message)
            }
            ErrorPayload::Value(Value::String(message)) => StructuredError::new(message),
            ErrorPayload::Value(value) => {
                // serde_json::Map is a BTreeMap here, so keys come out sorted
                let message =
                    serde_json::to_string(&value).unwrap_or_else(|_| format!("{:?}", value));
                StructuredError::new(message)
            }
        }
    }
}

/// Normalize any error-like value into a [`StructuredError`]
///
/// # Example
///
/// ```
/// use platform_logger::{to_error, ErrorPayload, StructuredError};
/// use serde_json::json;
///
/// let original = StructuredError::new("boom");
/// assert!(StructuredError::ptr_eq(&to_error(original.clone()), &original));
///
/// assert_eq!(to_error("oops").message(), "oops");
/// assert_eq!(to_error(json!({"a": 1})).message(), r#"{"a":1}"#);
/// assert_eq!(to_error(42).message(), "42");
/// ```
pub fn to_error(value: impl Into<ErrorPayload>) -> StructuredError {
    value.into().into_error()
}

impl From<StructuredError> for ErrorPayload {
    fn from(err: StructuredError) -> Self {
        ErrorPayload::Error(err)
    }
}

impl From<&StructuredError> for ErrorPayload {
    fn from(err: &StructuredError) -> Self {
        ErrorPayload::Error(err.clone())
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        ErrorPayload::Message(message.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        ErrorPayload::Message(message)
    }
}

impl From<&String> for ErrorPayload {
    fn from(message: &String) -> Self {
        ErrorPayload::Message(message.clone())
    }
}

impl From<Value> for ErrorPayload {
    fn from(value: Value) -> Self {
        ErrorPayload::Value(value)
    }
}

macro_rules! payload_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ErrorPayload {
                fn from(value: $ty) -> Self {
                    ErrorPayload::Value(Value::from(value))
                }
            }
        )*
    };
}

payload_from_scalar!(i32, i64, u32, u64, f64, bool);

impl From<Box<dyn StdError + Send + Sync + 'static>> for ErrorPayload {
    fn from(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        ErrorPayload::Error(StructuredError::from_boxed(err))
    }
}

impl From<std::io::Error> for ErrorPayload {
    fn from(err: std::io::Error) -> Self {
        ErrorPayload::Error(StructuredError::from_error(err))
    }
}

impl From<serde_json::Error> for ErrorPayload {
    fn from(err: serde_json::Error) -> Self {
        ErrorPayload::Error(StructuredError::from_error(err))
    }
}

impl From<LoggerError> for ErrorPayload {
    fn from(err: LoggerError) -> Self {
        ErrorPayload::Error(StructuredError::from_error(err))
    }
}

//! Reporting for contained handler failures
//!
//! The dispatch loop never lets a handler failure escape. When a callback is
//! installed it is told about each one after the fact; the callback itself
//! is also contained.

use super::{error::LoggerError, log_level::LogLevel};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// How a handler invocation failed
#[derive(Debug)]
pub enum FailureKind {
    /// The handler returned `Err`
    Error(LoggerError),
    /// The handler panicked; carries the panic message when it was a string
    Panic(String),
}

/// A single contained handler failure
#[derive(Debug)]
pub struct HandlerFailure {
    pub handler: String,
    pub level: LogLevel,
    pub kind: FailureKind,
}

impl HandlerFailure {
    pub fn is_panic(&self) -> bool {
        matches!(self.kind, FailureKind::Panic(_))
    }
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FailureKind::Error(e) => {
                write!(f, "handler '{}' failed at {}: {}", self.handler, self.level, e)
            }
            FailureKind::Panic(msg) => {
                write!(f, "handler '{}' panicked at {}: {}", self.handler, self.level, msg)
            }
        }
    }
}

/// Callback invoked with each contained handler failure
///
/// It must not log through the logger it is attached to.
pub type FailureCallback = Arc<dyn Fn(&HandlerFailure) + Send + Sync>;

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

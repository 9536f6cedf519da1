//! Handler trait for log output destinations

use super::{error::Result, log_level::LogLevel, metadata::Metadata, structured_error::StructuredError};

/// A sink receiving dispatched log calls, one method per level
///
/// Errors returned (or panics raised) by a handler are contained by the
/// logger and never reach the caller or the other handlers.
pub trait Handler: Send + Sync {
    fn debug(&self, message: &str, meta: Option<&Metadata>) -> Result<()>;
    fn info(&self, message: &str, meta: Option<&Metadata>) -> Result<()>;
    fn warn(&self, message: &str, meta: Option<&Metadata>) -> Result<()>;
    fn error(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()>;
    fn fatal(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()>;

    fn name(&self) -> &str {
        "handler"
    }
}

/// What a single dispatch hands to each handler
#[derive(Debug, Clone, Copy)]
pub(crate) enum Record<'a> {
    Message(&'a str),
    Error(&'a StructuredError),
}

/// Route a record to the handler method matching `level`
///
/// The logger only pairs message levels with `Record::Message` and
/// error levels with `Record::Error`.
pub(crate) fn deliver(
    handler: &dyn Handler,
    level: LogLevel,
    record: Record<'_>,
    meta: Option<&Metadata>,
) -> Result<()> {
    match (level, record) {
        (LogLevel::Debug, Record::Message(message)) => handler.debug(message, meta),
        (LogLevel::Info, Record::Message(message)) => handler.info(message, meta),
        (LogLevel::Warn, Record::Message(message)) => handler.warn(message, meta),
        (LogLevel::Error, Record::Error(err)) => handler.error(err, meta),
        (LogLevel::Fatal, Record::Error(err)) => handler.fatal(err, meta),
        (level, record) => Err(super::error::LoggerError::other(format!(
            "mismatched record {:?} for level {}",
            record, level
        ))),
    }
}

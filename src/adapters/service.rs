//! Framework-style logger facade
//!
//! Web frameworks usually expect a logger with `log`/`error`/`warn`/
//! `debug`/`verbose` methods taking an optional context name. This adapter
//! routes those calls into a [`Logger`] so framework output goes through the
//! same handlers as application output.

use crate::core::{LogLevel, Logger, Metadata};
use serde_json::Value;
use std::sync::Arc;

/// Adapter mapping framework log calls onto a shared [`Logger`]
///
/// | call                        | level | metadata                         |
/// |-----------------------------|-------|----------------------------------|
/// | `log(msg, ctx)`             | info  | `{context}` or none              |
/// | `warn(msg, ctx)`            | warn  | `{context}` or none              |
/// | `debug(msg, ctx)`           | debug | `{context}` or none              |
/// | `verbose(msg, ctx)`         | debug | `{context, verbose: true}` or none |
/// | `error(msg, trace, ctx)`    | error | always `{context, trace}`        |
///
/// Absent values in the `error` metadata are JSON `null`.
#[derive(Debug, Clone)]
pub struct ServiceLogger {
    logger: Arc<Logger>,
}

impl ServiceLogger {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn log(&self, message: &str, context: Option<&str>) {
        self.emit(LogLevel::Info, message, context_meta(context));
    }

    pub fn warn(&self, message: &str, context: Option<&str>) {
        self.emit(LogLevel::Warn, message, context_meta(context));
    }

    pub fn debug(&self, message: &str, context: Option<&str>) {
        self.emit(LogLevel::Debug, message, context_meta(context));
    }

    pub fn verbose(&self, message: &str, context: Option<&str>) {
        let meta = context_meta(context).map(|m| m.with_field("verbose", true));
        self.emit(LogLevel::Debug, message, meta);
    }

    pub fn error(&self, message: &str, trace: Option<&str>, context: Option<&str>) {
        let meta = Metadata::new()
            .with_field("context", optional(context))
            .with_field("trace", optional(trace));
        self.logger.error_with_meta(message, &meta);
    }

    fn emit(&self, level: LogLevel, message: &str, meta: Option<Metadata>) {
        self.logger.log(level, message, meta.as_ref());
    }
}

fn context_meta(context: Option<&str>) -> Option<Metadata> {
    context.map(|c| Metadata::new().with_field("context", c))
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, Value::from)
}

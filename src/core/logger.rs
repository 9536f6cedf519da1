//! Main logger implementation

use super::{
    failure::{panic_message, FailureCallback, FailureKind, HandlerFailure},
    handler::{deliver, Handler, Record},
    log_level::LogLevel,
    metadata::Metadata,
    metrics::LoggerMetrics,
    structured_error::{to_error, ErrorPayload},
};
use parking_lot::RwLock;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

type HandlerList = Arc<Vec<Arc<dyn Handler>>>;

/// Level-filtering dispatcher fanning each call out to its handlers
///
/// Every call runs synchronously on the caller's thread. A call below the
/// threshold returns without touching any handler. Otherwise the handlers
/// registered before the call are invoked in registration order, each one
/// guarded so that an `Err` or a panic is contained and the loop moves on.
///
/// The handler list is copy-on-write: a dispatch works on a snapshot taken
/// when it starts, so handlers registered meanwhile (even by a handler)
/// only see later calls.
pub struct Logger {
    threshold: AtomicU8,
    handlers: RwLock<HandlerList>,
    metrics: LoggerMetrics,
    on_failure: Option<FailureCallback>,
}

impl Logger {
    /// Logger at the default `Info` threshold with no handlers
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(LogLevel::default())
    }

    #[must_use]
    pub fn with_level(level: LogLevel) -> Self {
        Self {
            threshold: AtomicU8::new(level.rank()),
            handlers: RwLock::new(Arc::new(Vec::new())),
            metrics: LoggerMetrics::new(),
            on_failure: None,
        }
    }

    /// Register a handler; it receives every later call that passes the threshold
    pub fn add_handler<H: Handler + 'static>(&self, handler: H) {
        self.add_shared_handler(Arc::new(handler));
    }

    /// Register a handler that is also held elsewhere
    pub fn add_shared_handler(&self, handler: Arc<dyn Handler>) {
        let mut handlers = self.handlers.write();
        let mut next = Vec::with_capacity(handlers.len() + 1);
        next.extend(handlers.iter().cloned());
        next.push(handler);
        *handlers = Arc::new(next);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_rank(self.threshold.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Change the threshold for subsequent calls
    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level.rank(), Ordering::Relaxed);
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Generic entry point for message levels
    ///
    /// An `Error` or `Fatal` level normalizes `message` as a string payload.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>, meta: Option<&Metadata>) {
        if level.carries_error() {
            self.emit_error(level, message.as_ref(), meta);
        } else {
            self.emit_message(level, message.as_ref(), meta);
        }
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit_message(LogLevel::Debug, message.as_ref(), None);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.emit_message(LogLevel::Info, message.as_ref(), None);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.emit_message(LogLevel::Warn, message.as_ref(), None);
    }

    /// Normalize `payload` with [`to_error`] and dispatch it at `Error`
    #[inline]
    pub fn error(&self, payload: impl Into<ErrorPayload>) {
        self.emit_error(LogLevel::Error, payload, None);
    }

    /// Normalize `payload` with [`to_error`] and dispatch it at `Fatal`
    #[inline]
    pub fn fatal(&self, payload: impl Into<ErrorPayload>) {
        self.emit_error(LogLevel::Fatal, payload, None);
    }

    pub fn debug_with_meta(&self, message: impl AsRef<str>, meta: &Metadata) {
        self.emit_message(LogLevel::Debug, message.as_ref(), Some(meta));
    }

    pub fn info_with_meta(&self, message: impl AsRef<str>, meta: &Metadata) {
        self.emit_message(LogLevel::Info, message.as_ref(), Some(meta));
    }

    pub fn warn_with_meta(&self, message: impl AsRef<str>, meta: &Metadata) {
        self.emit_message(LogLevel::Warn, message.as_ref(), Some(meta));
    }

    pub fn error_with_meta(&self, payload: impl Into<ErrorPayload>, meta: &Metadata) {
        self.emit_error(LogLevel::Error, payload, Some(meta));
    }

    pub fn fatal_with_meta(&self, payload: impl Into<ErrorPayload>, meta: &Metadata) {
        self.emit_error(LogLevel::Fatal, payload, Some(meta));
    }

    fn emit_message(&self, level: LogLevel, message: &str, meta: Option<&Metadata>) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        self.dispatch(level, Record::Message(message), meta);
    }

    fn emit_error(&self, level: LogLevel, payload: impl Into<ErrorPayload>, meta: Option<&Metadata>) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        // Normalized once; every handler sees the same error
        let err = to_error(payload);
        self.dispatch(level, Record::Error(&err), meta);
    }

    fn dispatch(&self, level: LogLevel, record: Record<'_>, meta: Option<&Metadata>) {
        let handlers: HandlerList = self.handlers.read().clone();
        self.metrics.record_dispatched();

        for handler in handlers.iter() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                deliver(handler.as_ref(), level, record, meta)
            }));

            match outcome {
                Ok(Ok(())) => {
                    self.metrics.record_delivered();
                }
                Ok(Err(e)) => {
                    self.metrics.record_handler_error();
                    self.report_failure(handler.as_ref(), level, FailureKind::Error(e));
                }
                Err(payload) => {
                    self.metrics.record_handler_panic();
                    let message = panic_message(payload.as_ref());
                    self.report_failure(handler.as_ref(), level, FailureKind::Panic(message));
                }
            }
        }
    }

    fn report_failure(&self, handler: &dyn Handler, level: LogLevel, kind: FailureKind) {
        let Some(callback) = &self.on_failure else {
            return;
        };
        let _ = panic::catch_unwind(AssertUnwindSafe(|| {
            let failure = HandlerFailure {
                handler: handler.name().to_string(),
                level,
                kind,
            };
            callback(&failure);
        }));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

/// Create a logger at `level`, or at `Info` when `None`
///
/// # Example
///
/// ```
/// use platform_logger::{create_logger, LogLevel};
///
/// assert_eq!(create_logger(None).level(), LogLevel::Info);
/// assert_eq!(create_logger(LogLevel::Warn).level(), LogLevel::Warn);
/// ```
#[must_use]
pub fn create_logger(level: impl Into<Option<LogLevel>>) -> Logger {
    Logger::with_level(level.into().unwrap_or_default())
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use platform_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .handler(ConsoleHandler::new())
///     .on_handler_failure(Arc::new(|failure: &HandlerFailure| {
///         eprintln!("ALERT: {}", failure);
///     }))
///     .build();
/// assert_eq!(logger.handler_count(), 1);
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    handlers: Vec<Arc<dyn Handler>>,
    on_failure: Option<FailureCallback>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            handlers: Vec::new(),
            on_failure: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shared_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Set a callback for contained handler failures
    #[must_use = "builder methods return a new value"]
    pub fn on_handler_failure(mut self, callback: FailureCallback) -> Self {
        self.on_failure = Some(callback);
        self
    }

    pub fn build(self) -> Logger {
        let mut logger = Logger::with_level(self.level);
        logger.on_failure = self.on_failure;
        *logger.handlers.get_mut() = Arc::new(self.handlers);
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{LoggerError, Result};
    use crate::core::structured_error::StructuredError;
    use crate::handlers::MemoryHandler;
    use parking_lot::Mutex;
    use std::sync::Weak;

    struct FailingHandler;

    impl Handler for FailingHandler {
        fn debug(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
            Err(LoggerError::other("debug failed"))
        }
        fn info(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
            Err(LoggerError::other("info failed"))
        }
        fn warn(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
            panic!("warn exploded");
        }
        fn error(&self, _err: &StructuredError, _meta: Option<&Metadata>) -> Result<()> {
            panic!("error exploded");
        }
        fn fatal(&self, _err: &StructuredError, _meta: Option<&Metadata>) -> Result<()> {
            Err(LoggerError::other("fatal failed"))
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Registers `late` through the logger while handling a call
    struct Registrar {
        logger: Weak<Logger>,
        late: MemoryHandler,
    }

    impl Handler for Registrar {
        fn debug(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
            Ok(())
        }
        fn info(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
            if let Some(logger) = self.logger.upgrade() {
                logger.add_handler(self.late.clone());
            }
            Ok(())
        }
        fn warn(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
            Ok(())
        }
        fn error(&self, _err: &StructuredError, _meta: Option<&Metadata>) -> Result<()> {
            Ok(())
        }
        fn fatal(&self, _err: &StructuredError, _meta: Option<&Metadata>) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_level_is_info() {
        let logger = Logger::new();
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(!logger.is_enabled(LogLevel::Debug));
        assert!(logger.is_enabled(LogLevel::Info));
        assert_eq!(create_logger(None).level(), LogLevel::Info);
    }

    #[test]
    fn test_no_handlers_is_a_no_op() {
        let logger = create_logger(LogLevel::Debug);
        logger.debug("nobody listens");
        logger.error("still fine");
        assert_eq!(logger.metrics().dispatched_count(), 2);
        assert_eq!(logger.metrics().delivered_count(), 0);
    }

    #[test]
    fn test_set_level_applies_to_later_calls() {
        let memory = MemoryHandler::new();
        let logger = create_logger(LogLevel::Error);
        logger.add_handler(memory.clone());

        logger.warn("hidden");
        logger.set_level(LogLevel::Warn);
        logger.warn("shown");

        assert_eq!(logger.level(), LogLevel::Warn);
        assert_eq!(memory.messages(), vec!["shown".to_string()]);
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_is_enabled_matches_level_ordering() {
        for threshold in LogLevel::ALL {
            let logger = create_logger(threshold);
            for level in LogLevel::ALL {
                assert_eq!(logger.is_enabled(level), level.passes(threshold));
                assert_eq!(logger.is_enabled(level), level >= threshold);
            }
        }
    }

    #[test]
    fn test_builder() {
        let memory = MemoryHandler::new();
        let logger = Logger::builder()
            .level(LogLevel::Debug)
            .handler(memory.clone())
            .shared_handler(Arc::new(MemoryHandler::new()))
            .build();

        assert_eq!(logger.level(), LogLevel::Debug);
        assert_eq!(logger.handler_count(), 2);

        logger.debug("built");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.handler_count(), 0);
    }

    #[test]
    fn test_failures_are_contained_and_counted() {
        let memory = MemoryHandler::new();
        let logger = create_logger(LogLevel::Debug);
        logger.add_handler(FailingHandler);
        logger.add_handler(memory.clone());

        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");
        logger.fatal("f");

        assert_eq!(memory.len(), 5);
        let metrics = logger.metrics();
        assert_eq!(metrics.handler_errors(), 3);
        assert_eq!(metrics.handler_panics(), 2);
        assert_eq!(metrics.delivered_count(), 5);
    }

    #[test]
    fn test_failure_callback_sees_each_failure() {
        let seen: Arc<Mutex<Vec<(String, LogLevel, bool)>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let logger = Logger::builder()
            .level(LogLevel::Debug)
            .handler(FailingHandler)
            .on_handler_failure(Arc::new(move |failure: &HandlerFailure| {
                seen_clone
                    .lock()
                    .push((failure.handler.clone(), failure.level, failure.is_panic()));
            }))
            .build();

        logger.info("i");
        logger.error("e");

        let seen = seen.lock();
        assert_eq!(
            *seen,
            vec![
                ("failing".to_string(), LogLevel::Info, false),
                ("failing".to_string(), LogLevel::Error, true),
            ]
        );
    }

    #[test]
    fn test_panicking_callback_is_contained() {
        let memory = MemoryHandler::new();
        let logger = Logger::builder()
            .level(LogLevel::Debug)
            .handler(FailingHandler)
            .handler(memory.clone())
            .on_handler_failure(Arc::new(|_: &HandlerFailure| panic!("callback exploded")))
            .build();

        logger.info("still delivered");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_handler_registered_during_dispatch_misses_that_dispatch() {
        let late = MemoryHandler::new();
        let logger = Arc::new(create_logger(LogLevel::Debug));
        logger.add_handler(Registrar {
            logger: Arc::downgrade(&logger),
            late: late.clone(),
        });

        logger.info("first");
        assert!(late.is_empty());
        assert_eq!(logger.handler_count(), 2);

        logger.warn("second");
        assert_eq!(late.messages(), vec!["second".to_string()]);
    }

    #[test]
    fn test_error_is_normalized_once_for_all_handlers() {
        let first = MemoryHandler::new();
        let second = MemoryHandler::new();
        let logger = create_logger(LogLevel::Debug);
        logger.add_handler(first.clone());
        logger.add_handler(second.clone());

        logger.error("shared");

        let a = first.last().and_then(|r| r.error).expect("first handler saw the error");
        let b = second.last().and_then(|r| r.error).expect("second handler saw the error");
        assert!(StructuredError::ptr_eq(&a, &b));
    }

    #[test]
    fn test_log_with_error_level_normalizes_message() {
        let memory = MemoryHandler::new();
        let logger = create_logger(LogLevel::Debug);
        logger.add_handler(memory.clone());

        logger.log(LogLevel::Fatal, "via log", None);
        logger.log(LogLevel::Info, "plain", None);

        let records = memory.records();
        assert_eq!(records[0].level, LogLevel::Fatal);
        assert_eq!(records[0].error.as_ref().map(|e| e.message()), Some("via log"));
        assert_eq!(records[1].level, LogLevel::Info);
        assert!(records[1].error.is_none());
    }

    #[test]
    fn test_debug_format() {
        let logger = create_logger(LogLevel::Warn);
        logger.add_handler(MemoryHandler::new());
        let text = format!("{:?}", logger);
        assert!(text.contains("Warn"));
        assert!(text.contains("handlers: 1"));
    }
}

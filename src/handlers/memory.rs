//! In-memory handler that records every call

use crate::core::{Handler, LogLevel, Metadata, Result, StructuredError};
use parking_lot::Mutex;
use std::sync::Arc;

/// A single recorded call
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    pub level: LogLevel,
    /// The message, or the error's message at Error and Fatal
    pub message: String,
    /// `None` when the call carried no metadata
    pub metadata: Option<Metadata>,
    /// The exact error handed to the handler, at Error and Fatal
    pub error: Option<StructuredError>,
}

/// Records calls for later inspection
///
/// Clones share the same buffer, so a clone can be registered with a logger
/// while the original is kept for assertions.
///
/// # Example
///
/// ```
/// use platform_logger::{create_logger, LogLevel, MemoryHandler};
///
/// let memory = MemoryHandler::new();
/// let logger = create_logger(LogLevel::Debug);
/// logger.add_handler(memory.clone());
///
/// logger.info("hello");
/// assert_eq!(memory.messages(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHandler {
    records: Arc<Mutex<Vec<MemoryRecord>>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<MemoryRecord> {
        self.records.lock().clone()
    }

    pub fn last(&self) -> Option<MemoryRecord> {
        self.records.lock().last().cloned()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Number of recorded calls at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.records.lock().iter().filter(|r| r.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn push(&self, level: LogLevel, message: &str, meta: Option<&Metadata>, error: Option<&StructuredError>) {
        self.records.lock().push(MemoryRecord {
            level,
            message: message.to_string(),
            metadata: meta.cloned(),
            error: error.cloned(),
        });
    }
}

impl Handler for MemoryHandler {
    fn debug(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.push(LogLevel::Debug, message, meta, None);
        Ok(())
    }

    fn info(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.push(LogLevel::Info, message, meta, None);
        Ok(())
    }

    fn warn(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.push(LogLevel::Warn, message, meta, None);
        Ok(())
    }

    fn error(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        self.push(LogLevel::Error, err.message(), meta, Some(err));
        Ok(())
    }

    fn fatal(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        self.push(LogLevel::Fatal, err.message(), meta, Some(err));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_records() {
        let memory = MemoryHandler::new();
        let registered = memory.clone();

        registered.info("a", None).unwrap();
        registered.warn("b", None).unwrap();

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.count(LogLevel::Info), 1);
        assert_eq!(memory.messages(), vec!["a".to_string(), "b".to_string()]);

        memory.clear();
        assert!(registered.is_empty());
    }

    #[test]
    fn test_error_records_keep_identity() {
        let memory = MemoryHandler::new();
        let err = StructuredError::new("boom");
        let meta = Metadata::new().with_field("k", 1);

        memory.fatal(&err, Some(&meta)).unwrap();

        let record = memory.last().unwrap();
        assert_eq!(record.level, LogLevel::Fatal);
        assert_eq!(record.message, "boom");
        assert_eq!(record.metadata, Some(meta));
        assert!(StructuredError::ptr_eq(record.error.as_ref().unwrap(), &err));
    }
}

//! JSON-lines handler for structured sinks

use crate::core::{Handler, LogLevel, LoggerError, Metadata, Result, StructuredError};
use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One output line
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    level: LogLevel,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

/// Writes each call as a single-line JSON object (JSONL format)
///
/// Compatible with log shippers that tail JSONL files or read stdin.
/// Every line is flushed immediately, since the logger itself never
/// buffers.
pub struct JsonHandler<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the handler and return the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write(&self, level: LogLevel, message: &str, meta: Option<&Metadata>, source: Option<String>) -> Result<()> {
        let record = JsonRecord {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            message,
            metadata: meta,
            source,
        };
        let line = serde_json::to_string(&record)?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    fn write_error(&self, level: LogLevel, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        let source = std::error::Error::source(err).map(|s| s.to_string());
        self.write(level, err.message(), meta, source)
    }
}

impl JsonHandler<BufWriter<File>> {
    /// Append to the file at `path`, creating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::io_operation("opening log file", path.display().to_string(), e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn debug(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Debug, message, meta, None)
    }

    fn info(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Info, message, meta, None)
    }

    fn warn(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Warn, message, meta, None)
    }

    fn error(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        self.write_error(LogLevel::Error, err, meta)
    }

    fn fatal(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        self.write_error(LogLevel::Fatal, err, meta)
    }

    fn name(&self) -> &str {
        "json"
    }
}

//! Console handler implementation

use crate::core::{Handler, LogLevel, Metadata, Result, StructuredError};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Reference handler printing `[LEVEL] <message> <metadata>` lines
///
/// Debug and Info go to stdout, Warn, Error and Fatal to stderr. Metadata is
/// rendered as compact JSON, or as an empty string when absent.
pub struct ConsoleHandler {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Color the level tag (requires the `console` feature)
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub(crate) fn format_line(&self, level: LogLevel, body: &str, meta: Option<&Metadata>) -> String {
        let meta_str = meta.map(|m| m.to_string()).unwrap_or_default();
        format!("{} {} {}", self.tag(level), body, meta_str)
    }

    fn tag(&self, level: LogLevel) -> String {
        let tag = format!("[{}]", level.to_str());
        #[cfg(feature = "console")]
        if self.use_colors {
            return tag.color(level.color_code()).to_string();
        }
        tag
    }

    fn write(&self, level: LogLevel, body: &str, meta: Option<&Metadata>) -> Result<()> {
        let line = self.format_line(level, body, meta);
        match level {
            LogLevel::Debug | LogLevel::Info => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{}", line)?;
            }
            LogLevel::Warn | LogLevel::Error | LogLevel::Fatal => {
                let mut err = std::io::stderr().lock();
                writeln!(err, "{}", line)?;
            }
        }
        Ok(())
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn debug(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Debug, message, meta)
    }

    fn info(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Info, message, meta)
    }

    fn warn(&self, message: &str, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Warn, message, meta)
    }

    fn error(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Error, err.message(), meta)
    }

    fn fatal(&self, err: &StructuredError, meta: Option<&Metadata>) -> Result<()> {
        self.write(LogLevel::Fatal, err.message(), meta)
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// The reference console handler, without colors
pub fn create_console_handler() -> ConsoleHandler {
    ConsoleHandler::new()
}

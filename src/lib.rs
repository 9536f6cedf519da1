//! # Platform Logger
//!
//! A small structured logger: level filtering, fan-out to any number of
//! handlers, and per-handler fault isolation.
//!
//! ## Features
//!
//! - **Level Filtering**: calls below the threshold never reach a handler
//! - **Multiple Handlers**: console, JSON lines, in-memory, or your own
//! - **Fault Isolation**: a failing or panicking handler never affects the
//!   caller or the other handlers
//! - **Error Normalization**: `error` and `fatal` accept strings, errors and
//!   arbitrary serializable values
//!
//! ```
//! use platform_logger::prelude::*;
//!
//! let logger = create_logger(LogLevel::Warn);
//! let memory = MemoryHandler::new();
//! logger.add_handler(memory.clone());
//!
//! logger.info("filtered");
//! logger.warn("kept");
//! logger.error_with_meta("disk full", &metadata! { "volume" => "/var" });
//!
//! assert_eq!(memory.len(), 2);
//! ```

pub mod adapters;
pub mod core;
pub mod global;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::adapters::ServiceLogger;
    pub use crate::handlers::{create_console_handler, ConsoleHandler, JsonHandler, MemoryHandler};
    pub use crate::core::{
        create_logger, to_error, Environment, ErrorPayload, FailureCallback, FailureKind, Handler,
        HandlerFailure, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Metadata, Result, StructuredError,
    };
    pub use crate::metadata;
}

pub use crate::adapters::ServiceLogger;
pub use crate::handlers::{create_console_handler, ConsoleHandler, JsonHandler, MemoryHandler, MemoryRecord};
pub use crate::core::{
    create_logger, to_error, Environment, ErrorPayload, FailureCallback, FailureKind, Handler,
    HandlerFailure, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    Metadata, Result, StructuredError,
};

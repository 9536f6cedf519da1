//! Core logger types and traits

pub mod config;
pub mod error;
pub mod failure;
pub mod handler;
pub mod log_level;
pub mod logger;
pub mod metadata;
pub mod metrics;
pub mod structured_error;

pub use config::{Environment, LoggerConfig, ENVIRONMENT_VAR, LEVEL_VAR};
pub use error::{LoggerError, Result};
pub use failure::{FailureCallback, FailureKind, HandlerFailure};
pub use handler::Handler;
pub use log_level::LogLevel;
pub use logger::{create_logger, Logger, LoggerBuilder};
pub use metadata::Metadata;
pub use metrics::LoggerMetrics;
pub use structured_error::{to_error, ErrorPayload, StructuredError};

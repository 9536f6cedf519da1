//! Process-wide logger
//!
//! Applications usually build one logger at startup and share it. [`init`]
//! installs it once; [`logger`] returns it from anywhere, building one from
//! the environment on first use if nothing was installed.

use crate::core::{Logger, LoggerConfig, LoggerError, Result};
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger
///
/// Fails with [`LoggerError::AlreadyInitialized`] when a logger is already
/// installed, including the fallback built by [`logger`].
pub fn init(logger: Logger) -> Result<()> {
    LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The installed logger, if any
pub fn get() -> Option<&'static Logger> {
    LOGGER.get()
}

/// The installed logger, or one built from [`LoggerConfig::from_env`]
///
/// An invalid environment falls back to the default configuration.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(|| {
        LoggerConfig::from_env()
            .unwrap_or_default()
            .build()
    })
}

//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. None of them
//! attach metadata; use the `*_with_meta` methods together with
//! [`metadata!`](crate::metadata) for that.
//!
//! # Examples
//!
//! ```
//! use platform_logger::prelude::*;
//! use platform_logger::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at the given level with automatic formatting.
///
/// Error and Fatal levels normalize the formatted text as a string payload.
///
/// # Examples
///
/// ```
/// # use platform_logger::prelude::*;
/// # let logger = Logger::new();
/// use platform_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), None)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use platform_logger::prelude::*;
/// # let logger = Logger::new();
/// use platform_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use platform_logger::prelude::*;
/// # let logger = Logger::new();
/// use platform_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Build [`Metadata`](crate::Metadata) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use platform_logger::metadata;
///
/// let meta = metadata! { "user_id" => "123", "attempt" => 2 };
/// assert_eq!(meta.to_string(), r#"{"attempt":2,"user_id":"123"}"#);
/// assert!(metadata! {}.is_empty());
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut meta = $crate::Metadata::new();
        $(meta.add_field($key, $value);)+
        meta
    }};
}

//! Basic logger usage example
//!
//! Demonstrates level filtering, metadata, error normalization and handler
//! fault isolation with the console handler.
//!
//! Run with: cargo run --example basic_usage

use platform_logger::prelude::*;
use serde_json::json;

/// A handler that always fails, to show the other handlers are unaffected
struct FlakyHandler;

impl Handler for FlakyHandler {
    fn debug(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
        Err(LoggerError::other("sink unavailable"))
    }
    fn info(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
        Err(LoggerError::other("sink unavailable"))
    }
    fn warn(&self, _message: &str, _meta: Option<&Metadata>) -> Result<()> {
        Err(LoggerError::other("sink unavailable"))
    }
    fn error(&self, _err: &StructuredError, _meta: Option<&Metadata>) -> Result<()> {
        Err(LoggerError::other("sink unavailable"))
    }
    fn fatal(&self, _err: &StructuredError, _meta: Option<&Metadata>) -> Result<()> {
        Err(LoggerError::other("sink unavailable"))
    }
    fn name(&self) -> &str {
        "flaky"
    }
}

fn main() -> Result<()> {
    println!("=== Platform Logger - Basic Usage Example ===\n");

    let logger = create_logger(LogLevel::Debug);
    logger.add_handler(create_console_handler());

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Raising the threshold to WARN:");
    logger.set_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n3. Metadata:");
    logger.warn_with_meta(
        "Slow request",
        &metadata! { "path" => "/contacts", "elapsed_ms" => 1250 },
    );

    println!("\n4. Error payloads:");
    logger.error(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "db down"));
    logger.error(json!({ "code": 503, "reason": "unavailable" }));
    logger.error_with_meta("Payment failed", &metadata! { "order_id" => "A-17" });

    println!("\n5. A failing handler does not affect the others:");
    logger.add_handler(FlakyHandler);
    logger.error("Still delivered to the console");

    let metrics = logger.metrics();
    println!(
        "\n   dispatched={} filtered={} delivered={} failures={}",
        metrics.dispatched_count(),
        metrics.filtered_count(),
        metrics.delivered_count(),
        metrics.handler_failures()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

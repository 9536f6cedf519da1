//! Service adapter example
//!
//! Builds a logger from the environment and routes framework-style calls
//! through [`ServiceLogger`] into the same handlers.
//!
//! Run with: APP_ENV=development cargo run --example service_adapter

use platform_logger::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Platform Logger - Service Adapter Example ===\n");

    let config = LoggerConfig::from_env()?;
    println!(
        "Environment: {}, effective level: {}\n",
        config.environment,
        config.effective_level()
    );

    let logger = Arc::new(
        Logger::builder()
            .level(config.effective_level())
            .handler(ConsoleHandler::with_colors(config.colors))
            .on_handler_failure(Arc::new(|failure: &HandlerFailure| {
                eprintln!("handler failure: {}", failure);
            }))
            .build(),
    );
    logger.info("Application bootstrapped");

    // Framework messages share the application's handlers
    let service = ServiceLogger::new(Arc::clone(&logger));

    service.log("Mapped {/contacts, GET} route", Some("RouterExplorer"));
    service.debug("Resolving dependencies", Some("InstanceLoader"));
    service.verbose("Module graph built", Some("InstanceLoader"));
    service.warn("Deprecated option used", None);
    service.error(
        "Unhandled exception",
        Some("at ContactsController.find"),
        Some("ExceptionsHandler"),
    );

    println!(
        "\n   delivered={} failures={}",
        logger.metrics().delivered_count(),
        logger.metrics().handler_failures()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

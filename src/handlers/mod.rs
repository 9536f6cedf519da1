//! Handler implementations

pub mod console;
pub mod json;
pub mod memory;

pub use console::{create_console_handler, ConsoleHandler};
pub use json::JsonHandler;
pub use memory::{MemoryHandler, MemoryRecord};

pub use crate::core::Handler;

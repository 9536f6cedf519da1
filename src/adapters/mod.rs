//! Adapters exposing the logger through other logging interfaces

pub mod service;

pub use service::ServiceLogger;

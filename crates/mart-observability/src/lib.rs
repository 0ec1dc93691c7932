//! Logging setup for the Mobile Mart storefront.
//!
//! This crate provides:
//! - `LoggingConfig` - Level and output format, deserializable from config files
//! - `init` - Installs the process-wide `tracing` subscriber

mod logging;

pub use logging::*;

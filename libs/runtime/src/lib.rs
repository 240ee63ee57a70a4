//! Ambient runtime support for the profile server: configuration loading,
//! logging initialization and shutdown signal handling.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, LoggingConfig, Section, ServerConfig};
pub use shutdown::wait_for_shutdown;

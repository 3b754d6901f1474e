//! Todocast server support: configuration for the `todocast` binary.

pub mod config;

pub use config::{ConfigError, ServerConfig};

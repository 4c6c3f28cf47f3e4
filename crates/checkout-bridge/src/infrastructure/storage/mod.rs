//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads [`crate::domain::BridgeConfig`] from a TOML
//! file, falls back to defaults when the file does not exist, and writes it
//! back.  Nothing else in the crate touches the file system for
//! configuration.

pub mod config;

pub use config::{load_config, save_config, ConfigError};

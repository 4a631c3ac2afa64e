//! Configuration model for kmacro.
//!
//! This module defines the Config struct that represents the `kmacro.yaml`
//! settings file: the printer connection and the list of named macros.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, resolve_config_path};
pub use types::{ConnectionConfig, MacroDefinition};

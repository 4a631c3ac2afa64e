//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for kmacro.
///
/// This struct represents the contents of `kmacro.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where expanded commands are delivered.
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Named macros, in display order.
    #[serde(default = "default_macros")]
    pub macros: Vec<MacroDefinition>,

    /// Emit debug diagnostics on stderr.
    #[serde(default)]
    pub debug_logging: bool,

    /// Append an NDJSON record for every dispatched macro to this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            macros: default_macros(),
            debug_logging: false,
            event_log: None,
        }
    }
}

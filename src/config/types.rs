//! Configuration types and defaults for kmacro.
//!
//! This module defines the connection and macro entries plus the default
//! value functions used by the Config struct.

use serde::{Deserialize, Serialize};

/// How expanded commands reach the printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Klipper virtual serial port (pseudo-tty or fifo). Commands are written line by line.
    #[serde(default = "default_port")]
    pub port: String,

    /// External program that receives commands on stdin instead of the port.
    ///
    /// Split into argv with shell-words; no shell is involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            command: None,
        }
    }
}

/// A named macro template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDefinition {
    /// Display name, unique across the config.
    pub name: String,

    /// Command template, possibly multi-line, with `{...}` placeholders.
    #[serde(rename = "macro")]
    pub template: String,

    /// Show in the sidebar panel.
    #[serde(default = "default_true")]
    pub sidebar: bool,

    /// Show in the macro tab.
    #[serde(default = "default_true")]
    pub tab: bool,
}

impl MacroDefinition {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            sidebar: true,
            tab: true,
        }
    }
}

/// Default macro list: a single emergency stop.
pub fn default_macros() -> Vec<MacroDefinition> {
    vec![MacroDefinition::new("E-Stop", "M112")]
}

// Default value functions for serde
pub(crate) fn default_port() -> String {
    "/tmp/printer".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}

//! Config loading, validation, and lookup operations.

use super::model::Config;
use super::types::MacroDefinition;
use crate::error::{KmacroError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable naming the settings file.
pub const CONFIG_ENV_VAR: &str = "KMACRO_CONFIG";

/// Settings file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kmacro.yaml";

/// Decide which settings file to load.
///
/// Order: explicit path, then `$KMACRO_CONFIG`, then `./kmacro.yaml` if it
/// exists. `None` means built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}

impl Config {
    /// Load the config selected by [`resolve_config_path`], or defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(KmacroError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            KmacroError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| KmacroError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - macro names must be non-empty and unique (case-insensitive)
    /// - `connection.port` must be non-empty unless `connection.command` is set
    /// - `connection.command` must split into a non-empty argv
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for m in &self.macros {
            let name = m.name.trim();
            if name.is_empty() {
                return Err(KmacroError::ConfigError(
                    "config validation failed: macro names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(name_key(name)) {
                return Err(KmacroError::ConfigError(format!(
                    "config validation failed: duplicate macro name '{}'",
                    name
                )));
            }
        }

        match &self.connection.command {
            Some(command) => {
                let args = shell_words::split(command).map_err(|e| {
                    KmacroError::ConfigError(format!(
                        "config validation failed: cannot parse connection.command '{}': {}",
                        command, e
                    ))
                })?;
                if args.is_empty() {
                    return Err(KmacroError::ConfigError(
                        "config validation failed: connection.command is empty".to_string(),
                    ));
                }
            }
            None if self.connection.port.trim().is_empty() => {
                return Err(KmacroError::ConfigError(
                    "config validation failed: connection.port must be set when no connection.command is given"
                        .to_string(),
                ));
            }
            None => {}
        }

        Ok(())
    }

    /// Find a macro by name (case-insensitive).
    pub fn find_macro(&self, name: &str) -> Result<&MacroDefinition> {
        let name = name.trim();
        let wanted = name_key(name);
        self.macros
            .iter()
            .find(|m| name_key(&m.name) == wanted)
            .ok_or_else(|| {
                KmacroError::UserError(format!(
                    "no macro named '{}'. Run `kmacro list` to see configured macros.",
                    name
                ))
            })
    }
}

/// Case-insensitive form of a macro name, shared by validation and lookup.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

//! Event logging for dispatched macros.
//!
//! When `event_log` is configured, every macro run is appended to that file as
//! one JSON object per line (NDJSON), giving an audit trail of what was sent
//! to the printer.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: `execute` or `dry_run`
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `macro`: Name of the macro that was run
//! - `details`: Bound parameters and command count
//!
//! ```no_run
//! use kmacro::events::{Event, EventAction, append_event};
//! use serde_json::json;
//!
//! let event = Event::new(EventAction::Execute, "E-Stop")
//!     .with_details(json!({"commands": 1}));
//! append_event("/tmp/kmacro.ndjson", &event)?;
//! # Ok::<(), kmacro::error::KmacroError>(())
//! ```

use crate::error::{KmacroError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Commands were sent to the printer.
    Execute,
    /// Commands were expanded and printed only.
    DryRun,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Execute => write!(f, "execute"),
            EventAction::DryRun => write!(f, "dry_run"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Name of the macro.
    #[serde(rename = "macro")]
    pub macro_name: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event for a macro.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction, macro_name: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            macro_name: macro_name.into(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| KmacroError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the log at `path`.
///
/// The file and its parent directory are created if missing. Each append
/// writes exactly one line with a trailing newline.
pub fn append_event<P: AsRef<Path>>(path: P, event: &Event) -> Result<()> {
    let path = path.as_ref();
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            KmacroError::UserError(format!(
                "failed to create event log directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            KmacroError::UserError(format!(
                "failed to open event log '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        KmacroError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_event_creation() {
        let event = Event::new(EventAction::Execute, "E-Stop");

        assert_eq!(event.action, EventAction::Execute);
        assert_eq!(event.macro_name, "E-Stop");
        assert!(!event.actor.is_empty());
        let age = Utc::now().signed_duration_since(event.ts);
        assert!(age.num_minutes() < 1);
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::new(EventAction::DryRun, "Move")
            .with_details(json!({"parameters": {"X": "10"}, "commands": 2}));

        let json_line = event.to_ndjson_line().unwrap();
        assert!(!json_line.contains('\n'));
        assert!(json_line.contains("\"dry_run\""));
        assert!(json_line.contains("\"macro\":\"Move\""));

        let parsed: Event = serde_json::from_str(&json_line).unwrap();
        assert_eq!(parsed.action, EventAction::DryRun);
        assert_eq!(parsed.details["commands"], 2);
    }

    #[test]
    fn test_append_event_creates_file_and_appends() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("logs").join("events.ndjson");

        append_event(&log, &Event::new(EventAction::Execute, "Home")).unwrap();
        append_event(&log, &Event::new(EventAction::DryRun, "Move")).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Event = serde_json::from_str(lines[0]).unwrap();
        let second: Event = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first.macro_name, "Home");
        assert_eq!(second.action, EventAction::DryRun);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(EventAction::Execute.to_string(), "execute");
        assert_eq!(EventAction::DryRun.to_string(), "dry_run");
    }
}

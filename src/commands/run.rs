//! Implementation of the `kmacro run` and `kmacro expand` commands.
//!
//! # What `kmacro run` does
//!
//! 1. Looks up the macro by name and processes its template
//! 2. Applies `--set` bindings in order; unbound parameters keep their defaults
//! 3. Expands the template into command lines
//! 4. Sends the commands to the configured port or program (stdout with `--dry-run`)
//! 5. Appends an event to `event_log`, if configured

use super::apply_bindings;
use crate::cli::{ExpandArgs, RunArgs};
use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use crate::macros::MacroSession;
use crate::transport::{CommandSink, WriterSink, open_sink};
use serde_json::json;
use tracing::{debug, info};

/// Execute the `kmacro run` command.
pub fn cmd_run(config: &Config, args: RunArgs) -> Result<()> {
    let definition = config.find_macro(&args.name)?;

    let mut session = MacroSession::new();
    session.process(&definition.template, &definition.name);
    apply_bindings(&mut session, &args.bindings)?;

    if !session.has_parameters() {
        debug!(macro_name = %definition.name, "no parameters; sending template as-is");
    }

    let mut sink = open_sink(&config.connection, args.dry_run);
    let commands = run_session(&session, sink.as_mut())?;

    let action = if args.dry_run {
        EventAction::DryRun
    } else {
        EventAction::Execute
    };
    info!(macro_name = %definition.name, commands = commands.len(), %action, "macro dispatched");

    if let Some(log) = &config.event_log {
        let event = Event::new(action, session.name()).with_details(event_details(&session, &commands));
        // The commands already reached the printer; a logging failure must not hide that.
        if let Err(e) = append_event(log, &event) {
            eprintln!("Warning: failed to log {} event: {}", action, e);
        }
    }

    if !args.dry_run {
        println!(
            "Sent {} command(s) from '{}'.",
            commands.len(),
            session.name()
        );
    }

    Ok(())
}

/// Execute the `kmacro expand` command.
pub fn cmd_expand(args: ExpandArgs) -> Result<()> {
    let mut session = MacroSession::new();
    session.process(&args.template, "expand");
    apply_bindings(&mut session, &args.bindings)?;

    run_session(&session, &mut WriterSink::stdout())?;
    Ok(())
}

/// Expand the session and hand the commands to `sink`.
pub(crate) fn run_session(
    session: &MacroSession,
    sink: &mut dyn CommandSink,
) -> Result<Vec<String>> {
    let commands = session.execute()?;
    sink.send(&commands)?;
    Ok(commands)
}

fn event_details(session: &MacroSession, commands: &[String]) -> serde_json::Value {
    let parameters: Vec<_> = session
        .parameters()
        .bound_values()
        .into_iter()
        .map(|(label, value)| json!({"label": label, "value": value}))
        .collect();

    json!({
        "parameters": parameters,
        "commands": commands.len(),
    })
}

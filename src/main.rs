//! Kmacro: parameterized printer macros for Klipper hosts.
//!
//! This is the main entry point for the `kmacro` CLI. It parses arguments,
//! loads the settings file, sets up logging, dispatches to the appropriate
//! command handler, and handles errors with proper exit codes.

mod cli;
mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod logging;
pub mod macros;
pub mod transport;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::Config;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result = Config::resolve(cli.config.as_deref()).and_then(|config| {
        logging::init_logging(cli.verbose || config.debug_logging);
        commands::dispatch(&config, cli.command)
    });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so stdout stays clean for command output.
//! `RUST_LOG` takes precedence over the `debug` switch.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug { "kmacro=debug" } else { "warn" }
}

/// Install the global subscriber.
pub fn init_logging(debug: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init();

    if let Err(e) = result {
        eprintln!("Log system initialization failed: {e}");
    }
}

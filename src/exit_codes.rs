//! Exit code constants for the kmacro CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown macro)
//! - 2: Configuration error (unreadable or invalid settings file)
//! - 3: Macro binding failure (placeholder/parameter mismatch, unknown parameter)
//! - 4: Transport failure (printer port or command sink)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an unknown macro name.
pub const USER_ERROR: i32 = 1;

/// Configuration error: the settings file could not be read, parsed, or validated.
pub const CONFIG_ERROR: i32 = 2;

/// Macro binding failure: parameters could not be bound or expanded.
pub const MACRO_FAILURE: i32 = 3;

/// Transport failure: expanded commands could not be delivered.
pub const TRANSPORT_FAILURE: i32 = 4;

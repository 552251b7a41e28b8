//! Exit codes returned by [`crate::run`].

/// Command completed.
pub const SUCCESS: i32 = 0;

/// Invalid input, configuration, I/O or engine failure.
pub const ERROR: i32 = 2;

/// Interrupted before finishing (Ctrl+C convention).
pub const INTERRUPTED: i32 = 130;

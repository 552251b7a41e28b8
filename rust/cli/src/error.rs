//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item failures with context for
//! commands that walk many records, such as `verify`.

use std::fmt;

use rinkside_engine::errors::MatchError;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
///
/// Every command handler returns this, so `?` works across I/O, config
/// and engine failures alike.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),

    /// Operation was interrupted before it finished
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<MatchError> for CliError {
    fn from(error: MatchError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// Failure tied to one item of a batch.
///
/// # Examples
///
/// ```rust
/// use rinkside_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: "20260101-000003".to_string(),
///     message: "home score 2 != recorded 3".to_string(),
/// };
/// assert_eq!(error.to_string(), "20260101-000003: home score 2 != recorded 3");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: fmt::Display> fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_error_formats_with_context() {
        let error = BatchValidationError {
            item_context: 42,
            message: "Invalid JSON record".to_string(),
        };
        assert_eq!(error.to_string(), "42: Invalid JSON record");
    }

    #[test]
    fn engine_errors_convert() {
        let e: CliError = MatchError::ClockExpired.into();
        assert!(matches!(e, CliError::Engine(_)));
        assert!(e.to_string().starts_with("Engine error:"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let e: CliError = std::io::Error::other("disk full").into();
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "I/O error: disk full");
    }
}

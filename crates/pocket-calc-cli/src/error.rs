//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML tape or config
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Malformed JSON tape, or output serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Calculator library error (unknown key label)
    #[error("{0}")]
    Calc(#[from] pocket_calc::core::CalcError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

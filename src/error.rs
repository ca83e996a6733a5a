//! Error types for the boscaiolo CLI.
//!
//! Listing and classification failures surface as `BoscaioloError` and abort
//! the whole command. Failures of individual worktrees during removal are not
//! errors at this level; they are collected in `CleanupResult::failed`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for boscaiolo operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoscaioloError {
    /// User provided invalid arguments or the environment is unusable.
    #[error("{0}")]
    UserError(String),

    /// The git binary exited non-zero (or could not be spawned).
    #[error("Git command failed: {0}")]
    CommandFailed(String),

    /// The config file could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Reading from or writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl BoscaioloError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            BoscaioloError::UserError(_) => exit_codes::USER_ERROR,
            BoscaioloError::CommandFailed(_) => exit_codes::GIT_FAILURE,
            BoscaioloError::ConfigError(_) => exit_codes::USER_ERROR,
            BoscaioloError::Io(_) => exit_codes::USER_ERROR,
        }
    }
}

impl From<std::io::Error> for BoscaioloError {
    fn from(err: std::io::Error) -> Self {
        BoscaioloError::Io(err.to_string())
    }
}

/// Result type alias for boscaiolo operations.
pub type Result<T> = std::result::Result<T, BoscaioloError>;

//! Centralized error handling.
//!
//! Every failure here aborts configuration loading; there is no partial
//! success mode.

use std::path::PathBuf;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Environment file
    #[error("Failed to read env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    // Remote patterns
    #[error("Invalid remote pattern '{pattern}': {reason}")]
    InvalidRemotePattern { pattern: String, reason: String },

    // Input validation
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    // Output
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get a stable error code for tooling
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EnvFile { .. } => "ENV_FILE_ERROR",
            AppError::InvalidRemotePattern { .. } => "INVALID_REMOTE_PATTERN",
            AppError::InvalidUrl(_) => "INVALID_URL",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn env_file(path: impl Into<PathBuf>, source: dotenvy::Error) -> Self {
        AppError::EnvFile {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_remote_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidRemotePattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

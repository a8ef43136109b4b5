//! Error types for Minty.
//!
//! Library crates use [`MintyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics, so every
//! unhandled failure exits the process non-zero.

use std::path::PathBuf;

/// Top-level error type for all Minty operations.
#[derive(Debug, thiserror::Error)]
pub enum MintyError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Malformed or unusable caller-supplied input.
    #[error("input error: {message}")]
    Input { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The interactive answer-collection session could not complete.
    #[error("interaction error: {0}")]
    Interaction(String),

    /// The content-addressable store is unreachable or rejected a submission.
    #[error("store error: {0}")]
    Store(String),

    /// Data validation error (missing field, invalid format, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MintyError>;

impl MintyError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

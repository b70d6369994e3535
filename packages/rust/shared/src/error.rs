//! Error types for repolens.
//!
//! Library crates use [`RepolensError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all repolens operations.
#[derive(Debug, thiserror::Error)]
pub enum RepolensError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level HTTP failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The remote API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// JSON decoding error for input files or API responses.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, invalid option, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// README splicing error (markers missing or out of order).
    #[error("render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RepolensError>;

impl RepolensError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
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

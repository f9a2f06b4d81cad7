//! Error types for lexindex
//!
//! This module defines all error types surfaced to callers.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Failures inside pooled tasks never reach this type directly: the worker
//! pool contains and logs them. Only ingestion, export and configuration
//! failures are reported to the immediate caller.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for lexindex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for lexindex
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading a resource or writing an export
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Worker pool misuse (submit after shutdown, spawn failure)
    #[error("Work queue error: {0}")]
    WorkQueue(String),

    /// Serialization error during export
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Path associated with this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

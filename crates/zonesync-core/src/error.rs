//! Error types shared by every zonesync component

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, validating or reconciling a declaration.
///
/// Every variant aborts the current run; nothing is retried.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Malformed declaration or configuration, missing required SOA fields
    #[error("Configuration error: {0}")]
    Config(String),

    /// A round-robin content names a round robin that does not exist
    #[error("No round robin by name \"{0}\" was found")]
    Reference(String),

    /// Unsupported record type, name outside its domain, empty resolved value
    #[error("Validation error: {0}")]
    Validation(String),

    /// A `file` content could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport or logic failure reported by (or about) a backend
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Classification of a [`SyncError`], independent of its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Reference,
    Validation,
    Io,
    Backend,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Config(_) => ErrorKind::Config,
            SyncError::Reference(_) => ErrorKind::Reference,
            SyncError::Validation(_) => ErrorKind::Validation,
            SyncError::Io { .. } => ErrorKind::Io,
            SyncError::Backend(_) => ErrorKind::Backend,
        }
    }

    pub fn backend(operation: &str, err: impl std::fmt::Display) -> Self {
        SyncError::Backend(format!("{}: {}", operation, err))
    }
}

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncError::Config(format!("Malformed YAML document: {}", err))
    }
}

/// Result type alias for zonesync operations
pub type SyncResult<T> = Result<T, SyncError>;

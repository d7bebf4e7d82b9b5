//! Error types for scan operations.
//!
//! Fatal setup conditions (`InvalidRoot`, `InvalidPattern`, `SinkError`,
//! `ConfigError`) abort a scan before any file is processed. Everything else
//! is recorded into the shared status and the scan keeps going.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while setting up or running a scan
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Not a directory: {0}")]
    InvalidRoot(PathBuf),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Cannot open results file {path}: {source}")]
    SinkError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot(path.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern(pattern.into())
    }

    pub fn sink_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SinkError {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

//! Error types for loading schemas and units.
//!
//! The engine itself never fails on configuration data; problems with a
//! configuration are reported as [`ValidationIssue`](crate::ValidationIssue)s.
//! Errors here only cover getting JSON into the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading descriptor sets, configurations or units.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid descriptor set: {message}")]
    InvalidDescriptors { message: String },

    #[error("invalid unit: {message}")]
    InvalidUnit { message: String },

    #[error("invalid configuration: expected a JSON object, got {actual}")]
    InvalidConfiguration { actual: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

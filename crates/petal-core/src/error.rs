//! Error types for petal-core.
//!
//! The domain evaluators never fail: a malformed date key is treated as
//! absent and a malformed persisted document resets to defaults. The only
//! fallible surface in this crate is the state store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced at the state-store boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The platform data directory could not be resolved or created
    #[error("Failed to prepare data directory at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the state file failed
    #[error("Failed to access state file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the state document failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for StoreError
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

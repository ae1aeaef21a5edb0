//! Error types for the persistence layer.
//!
//! Store operations themselves never fail; these errors only travel between a
//! [`TabPersistence`](crate::store::persist::TabPersistence) implementation
//! and the store, which logs and drops them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read work tab snapshot from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write work tab snapshot to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed work tab snapshot: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode work tab snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistError>;

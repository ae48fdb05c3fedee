//! Error types for listing and aggregation.

use thiserror::Error;

/// Errors surfaced by `list` and `total_size`.
///
/// None of these are retried here. A failed call never yields a partial
/// listing or a partial total.
#[derive(Error, Debug)]
pub enum Error {
    /// The path does not look like `s3://<bucket>/<key>`.
    #[error("Not recognizable S3 path '{0}'")]
    InvalidPath(String),

    /// The wildcard pattern could not be compiled.
    #[error("Invalid wildcard pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    /// The object store failed or answered with a non-success status.
    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

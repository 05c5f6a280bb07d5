// ABOUTME: Error types for manifest import and export
// ABOUTME: Parse failures keep the position reported by the JSON decoder

use agentdash_core::ValidationError;
use agentdash_storage::StorageError;
use thiserror::Error;

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Malformed manifest at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid manifest: {0}")]
    Invalid(String),

    #[error("Invalid manifest field: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode manifest: {0}")]
    Encode(String),
}

impl ManifestError {
    pub(crate) fn parse(err: serde_json::Error) -> Self {
        ManifestError::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

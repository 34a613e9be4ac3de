use std::path::PathBuf;

use filekeep_codec::CodecError;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The path is empty and cannot name a file or a lock key.
    #[error("invalid path: path is empty")]
    InvalidPath,

    /// The file to read does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The value could not be encoded, or the file content could not be
    /// decoded into the requested type.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Any other file-system failure (permissions, missing directory, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

use std::io;

/// Errors produced by file logging.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log path is empty or cannot be made absolute.
    #[error("invalid log path: {0}")]
    InvalidPath(String),

    /// I/O error while appending to the log file.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the log crate.
pub type LogResult<T> = std::result::Result<T, LogError>;

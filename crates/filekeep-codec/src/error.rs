use thiserror::Error;

/// Errors produced by JSON encoding and decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be represented as JSON.
    #[error("json encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The input is malformed JSON or does not match the requested type.
    #[error("json decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Encoded output was not valid UTF-8.
    #[error("json output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The selection token did not address any value in the document.
    #[error("token not found: {0}")]
    TokenNotFound(String),

    /// The selection token could not be parsed.
    #[error("invalid token {token:?}: {reason}")]
    InvalidToken { token: String, reason: String },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

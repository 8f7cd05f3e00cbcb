use thiserror::Error;

/// Errors returned by acknowledgment codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON or CBOR deserialization failure.
    #[error("decode error: {0}")]
    Decode(String),
    /// JSON or CBOR serialization failure.
    #[error("encode error: {0}")]
    Encode(String),
    /// Response-level shape validation failure.
    #[error("invalid response: {0}")]
    InvalidResponse(&'static str),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

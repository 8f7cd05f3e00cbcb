use thiserror::Error;

/// Failure raised while processing a versioned acknowledgment.
///
/// Display text is fully determined by caller-supplied message templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AckError {
    /// Response did not have the expected shape. Nothing was applied.
    #[error("{0}")]
    InvalidResponse(String),
    /// Server version differs from the caller's base version. Value and
    /// version were applied before this was raised.
    #[error("{0}")]
    VersionMismatch(String),
    /// Server reported a failure. Nothing was applied.
    #[error("{message} ({reason})")]
    Protocol { message: String, reason: String },
}

impl AckError {
    /// True when the caller's state was synchronized before the failure.
    pub fn state_applied(&self) -> bool {
        matches!(self, Self::VersionMismatch(_))
    }

    /// Server-reported reason, for protocol errors.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Protocol { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

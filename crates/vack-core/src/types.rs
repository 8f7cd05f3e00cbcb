use std::fmt;

use serde::{Deserialize, Serialize};

/// Field carrying the outcome tag.
pub const FIELD_RESULT: &str = "result";
/// Field carrying the version counter on success/mismatch outcomes.
pub const FIELD_VERSION: &str = "version";
/// Optional field carrying the server-reported reason on error outcomes.
pub const FIELD_REASON: &str = "reason";
/// Fields with protocol meaning; a value key must not collide with these.
pub const RESERVED_FIELDS: [&str; 3] = [FIELD_RESULT, FIELD_VERSION, FIELD_REASON];
/// Reason reported when an error outcome carries no usable reason string.
pub const UNKNOWN_REASON: &str = "unknown";

/// Revision counter of an externally owned resource.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(pub u64);

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outcome of an acknowledgment that carries a version and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AckResult {
    Success,
    VersionMismatch,
}

impl AckResult {
    /// Wire tag for this result.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::VersionMismatch => "version-mismatch",
        }
    }
}

impl fmt::Display for AckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of an acknowledgment response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AckOutcome {
    Success,
    VersionMismatch,
    Error,
}

impl AckOutcome {
    /// Parses a wire tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "success" => Some(Self::Success),
            "version-mismatch" => Some(Self::VersionMismatch),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Wire tag for this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::VersionMismatch => "version-mismatch",
            Self::Error => "error",
        }
    }

    /// Versioned result for outcomes that carry a version, `None` for errors.
    pub fn versioned(self) -> Option<AckResult> {
        match self {
            Self::Success => Some(AckResult::Success),
            Self::VersionMismatch => Some(AckResult::VersionMismatch),
            Self::Error => None,
        }
    }
}

impl From<AckResult> for AckOutcome {
    fn from(result: AckResult) -> Self {
        match result {
            AckResult::Success => Self::Success,
            AckResult::VersionMismatch => Self::VersionMismatch,
        }
    }
}

impl fmt::Display for AckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{AckOutcome, AckResult, Version};

    #[test]
    fn outcome_tags_match_wire_names() {
        for outcome in [
            AckOutcome::Success,
            AckOutcome::VersionMismatch,
            AckOutcome::Error,
        ] {
            assert_eq!(AckOutcome::from_tag(outcome.as_str()), Some(outcome));
        }
        assert_eq!(AckOutcome::from_tag("Success"), None);
        assert_eq!(AckOutcome::from_tag(""), None);
    }

    #[test]
    fn only_error_outcome_lacks_versioned_result() {
        assert_eq!(AckOutcome::Success.versioned(), Some(AckResult::Success));
        assert_eq!(
            AckOutcome::VersionMismatch.versioned(),
            Some(AckResult::VersionMismatch)
        );
        assert_eq!(AckOutcome::Error.versioned(), None);
    }

    #[test]
    fn serde_uses_kebab_case_tags() {
        let json = serde_json::to_string(&AckResult::VersionMismatch).expect("serialize");
        assert_eq!(json, "\"version-mismatch\"");
        let parsed: AckOutcome = serde_json::from_str("\"error\"").expect("deserialize");
        assert_eq!(parsed, AckOutcome::Error);
    }

    #[test]
    fn version_is_transparent_on_the_wire() {
        let json = serde_json::to_string(&Version(7)).expect("serialize");
        assert_eq!(json, "7");
        assert_eq!(Version(3).to_string(), "3");
        assert!(Version(2) < Version(5));
    }
}

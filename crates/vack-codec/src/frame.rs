use serde_json::Value;
use vack_core::{
    AckOutcome, AckResult, Version, FIELD_REASON, FIELD_RESULT, FIELD_VERSION, UNKNOWN_REASON,
};

use crate::error::CodecError;

/// Structurally validated acknowledgment, borrowing from the raw response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AckFrame<'a> {
    /// `success` or `version-mismatch` with a well-formed version.
    Versioned {
        result: AckResult,
        version: Version,
        /// Raw value under the configured key. `None` when absent or `null`.
        value: Option<&'a Value>,
    },
    /// `error`, with the reason or [`UNKNOWN_REASON`].
    Error { reason: &'a str },
}

impl AckFrame<'_> {
    /// Outcome tag this frame was decoded from.
    pub fn outcome(&self) -> AckOutcome {
        match self {
            Self::Versioned { result, .. } => (*result).into(),
            Self::Error { .. } => AckOutcome::Error,
        }
    }

    /// Version carried by the frame, if any.
    pub fn version(&self) -> Option<Version> {
        match self {
            Self::Versioned { version, .. } => Some(*version),
            Self::Error { .. } => None,
        }
    }
}

/// Validates a raw response and extracts its tagged fields.
///
/// Arrays and primitives are rejected as non-objects. A version must be a
/// non-negative integer; floats are rejected even when integral.
pub fn decode_ack_frame<'a>(raw: &'a Value, value_key: &str) -> Result<AckFrame<'a>, CodecError> {
    let fields = raw
        .as_object()
        .ok_or(CodecError::InvalidResponse("response must be an object"))?;

    let tag = fields
        .get(FIELD_RESULT)
        .and_then(Value::as_str)
        .ok_or(CodecError::InvalidResponse("missing result tag"))?;
    let outcome =
        AckOutcome::from_tag(tag).ok_or(CodecError::InvalidResponse("unknown result tag"))?;

    match outcome.versioned() {
        Some(result) => {
            let version = fields
                .get(FIELD_VERSION)
                .and_then(Value::as_u64)
                .map(Version)
                .ok_or(CodecError::InvalidResponse(
                    "version must be a non-negative integer",
                ))?;
            let value = fields.get(value_key).filter(|value| !value.is_null());
            Ok(AckFrame::Versioned {
                result,
                version,
                value,
            })
        }
        None => {
            let reason = fields
                .get(FIELD_REASON)
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_REASON);
            Ok(AckFrame::Error { reason })
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use vack_core::{AckOutcome, AckResult, Version};

    use super::{decode_ack_frame, AckFrame};

    #[test]
    fn decodes_success_with_value() {
        let raw = json!({ "result": "success", "version": 2, "metadata": "next" });
        let frame = decode_ack_frame(&raw, "metadata").expect("frame should decode");
        assert_eq!(
            frame,
            AckFrame::Versioned {
                result: AckResult::Success,
                version: Version(2),
                value: Some(&json!("next")),
            }
        );
        assert_eq!(frame.outcome(), AckOutcome::Success);
    }

    #[test]
    fn null_and_missing_values_are_absent() {
        let explicit = json!({ "result": "version-mismatch", "version": 1, "metadata": null });
        let missing = json!({ "result": "version-mismatch", "version": 1 });
        for raw in [&explicit, &missing] {
            match decode_ack_frame(raw, "metadata").expect("frame should decode") {
                AckFrame::Versioned { value, result, .. } => {
                    assert!(value.is_none());
                    assert_eq!(result, AckResult::VersionMismatch);
                }
                other => panic!("unexpected frame {other:?}"),
            }
        }
    }

    #[test]
    fn empty_string_value_is_present() {
        let raw = json!({ "result": "success", "version": 1, "metadata": "" });
        let frame = decode_ack_frame(&raw, "metadata").expect("frame should decode");
        assert!(matches!(
            frame,
            AckFrame::Versioned { value: Some(_), .. }
        ));
    }

    #[test]
    fn rejects_non_objects() {
        for raw in [json!(null), json!(42), json!("success"), json!([1, 2])] {
            let err = decode_ack_frame(&raw, "metadata").expect_err("non-object should fail");
            assert!(err.to_string().contains("response must be an object"));
        }
    }

    #[test]
    fn rejects_missing_or_unknown_tag() {
        let missing = json!({ "version": 1 });
        let err = decode_ack_frame(&missing, "v").expect_err("missing tag should fail");
        assert!(err.to_string().contains("missing result tag"));

        let numeric = json!({ "result": 1, "version": 1 });
        let err = decode_ack_frame(&numeric, "v").expect_err("non-string tag should fail");
        assert!(err.to_string().contains("missing result tag"));

        let unknown = json!({ "result": "ok", "version": 1 });
        let err = decode_ack_frame(&unknown, "v").expect_err("unknown tag should fail");
        assert!(err.to_string().contains("unknown result tag"));
    }

    #[test]
    fn rejects_malformed_versions() {
        for version in [json!("nope"), json!(-1), json!(2.5), json!(2.0), json!(null)] {
            let raw = json!({ "result": "success", "version": version });
            let err = decode_ack_frame(&raw, "v").expect_err("bad version should fail");
            assert!(err.to_string().contains("non-negative integer"));
        }
        let missing = json!({ "result": "success" });
        assert!(decode_ack_frame(&missing, "v").is_err());
    }

    #[test]
    fn error_frame_defaults_reason() {
        let with_reason = json!({ "result": "error", "reason": "access-denied" });
        assert_eq!(
            decode_ack_frame(&with_reason, "v").expect("frame should decode"),
            AckFrame::Error {
                reason: "access-denied"
            }
        );

        for raw in [
            json!({ "result": "error" }),
            json!({ "result": "error", "reason": 17 }),
            json!({ "result": "error", "reason": null }),
        ] {
            let frame = decode_ack_frame(&raw, "v").expect("frame should decode");
            assert_eq!(frame, AckFrame::Error { reason: "unknown" });
            assert_eq!(frame.version(), None);
        }
    }

    #[test]
    fn error_frame_ignores_version_field() {
        let raw = json!({ "result": "error", "version": "garbage" });
        let frame = decode_ack_frame(&raw, "v").expect("frame should decode");
        assert_eq!(frame.outcome(), AckOutcome::Error);
    }
}

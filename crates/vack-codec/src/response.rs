use serde_json::{Map, Value};
use vack_core::{AckOutcome, AckResult, Version, FIELD_REASON, FIELD_RESULT, FIELD_VERSION};

/// Typed acknowledgment as a server would send it.
#[derive(Debug, Clone, PartialEq)]
pub enum AckResponse {
    Versioned {
        result: AckResult,
        version: Version,
        value: Option<Value>,
    },
    Error {
        reason: Option<String>,
    },
}

impl AckResponse {
    pub fn success(version: Version, value: Option<Value>) -> Self {
        Self::Versioned {
            result: AckResult::Success,
            version,
            value,
        }
    }

    pub fn version_mismatch(version: Version, value: Option<Value>) -> Self {
        Self::Versioned {
            result: AckResult::VersionMismatch,
            version,
            value,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            reason: Some(reason.into()),
        }
    }

    pub fn outcome(&self) -> AckOutcome {
        match self {
            Self::Versioned { result, .. } => (*result).into(),
            Self::Error { .. } => AckOutcome::Error,
        }
    }

    /// Builds the raw response object, placing the value under `value_key`.
    ///
    /// An absent value is emitted as an explicit `null`.
    pub fn to_value(&self, value_key: &str) -> Value {
        let mut fields = Map::new();
        fields.insert(
            FIELD_RESULT.to_string(),
            Value::from(self.outcome().as_str()),
        );
        match self {
            Self::Versioned { version, value, .. } => {
                fields.insert(FIELD_VERSION.to_string(), Value::from(version.0));
                fields.insert(value_key.to_string(), value.clone().unwrap_or(Value::Null));
            }
            Self::Error { reason } => {
                if let Some(reason) = reason {
                    fields.insert(FIELD_REASON.to_string(), Value::from(reason.as_str()));
                }
            }
        }
        Value::Object(fields)
    }
}

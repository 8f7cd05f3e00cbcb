use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vack_core::RESERVED_FIELDS;

/// Errors returned while loading processor options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options file: {0}")]
    Read(std::io::Error),
    #[error("failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid options: {0}")]
    Invalid(&'static str),
}

/// Caller-facing failure text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AckMessages {
    /// Used for every malformed response.
    pub invalid_response: String,
    /// Prefix for server-reported errors, rendered as `"<error> (<reason>)"`.
    pub error: String,
    /// Used when the server reports a version conflict.
    pub version_mismatch: String,
}

impl Default for AckMessages {
    fn default() -> Self {
        Self {
            invalid_response: "Invalid response".to_string(),
            error: "Update failed".to_string(),
            version_mismatch: "Version mismatch".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AckOptions {
    /// Response field holding the value payload.
    pub value_key: String,
    pub messages: AckMessages,
}

impl Default for AckOptions {
    fn default() -> Self {
        Self {
            value_key: "value".to_string(),
            messages: AckMessages::default(),
        }
    }
}

impl AckOptions {
    pub fn new(value_key: impl Into<String>, messages: AckMessages) -> Self {
        Self {
            value_key: value_key.into(),
            messages,
        }
    }

    /// Rejects value keys that are empty or shadow a protocol field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.value_key.is_empty() {
            return Err(ConfigError::Invalid("value_key must not be empty"));
        }
        if RESERVED_FIELDS.contains(&self.value_key.as_str()) {
            return Err(ConfigError::Invalid(
                "value_key must not be a reserved response field",
            ));
        }
        Ok(())
    }

    /// Parses and validates options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads and validates options from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref()).map_err(ConfigError::Read)?;
        Self::from_toml_str(&text)
    }
}

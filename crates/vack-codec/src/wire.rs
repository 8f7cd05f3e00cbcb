use serde_json::Value;

use crate::error::CodecError;

/// Byte encoding of an acknowledgment on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    Json,
    Cbor,
}

impl WireFormat {
    /// Guesses the encoding from the leading byte.
    ///
    /// CBOR maps start with major type 5 (`0xa0..=0xbf`); everything else is
    /// treated as JSON.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.first() {
            Some(0xa0..=0xbf) => Self::Cbor,
            _ => Self::Json,
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Value, CodecError> {
        match self {
            Self::Json => decode_ack_json(bytes),
            Self::Cbor => decode_ack_cbor(bytes),
        }
    }
}

/// Decodes JSON bytes into an untyped response value.
pub fn decode_ack_json(bytes: &[u8]) -> Result<Value, CodecError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes CBOR bytes into an untyped response value.
///
/// Map keys must be text; byte strings are rejected. NaN and infinities are
/// rejected as well, since JSON has no representation for them and they would
/// otherwise read back as `null`.
pub fn decode_ack_cbor(bytes: &[u8]) -> Result<Value, CodecError> {
    let cbor: ciborium::Value =
        ciborium::de::from_reader(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
    reject_non_finite(&cbor)?;
    cbor.deserialized().map_err(|e| CodecError::Decode(e.to_string()))
}

fn reject_non_finite(value: &ciborium::Value) -> Result<(), CodecError> {
    match value {
        ciborium::Value::Float(f) if !f.is_finite() => Err(CodecError::InvalidResponse(
            "non-finite float has no JSON representation",
        )),
        ciborium::Value::Array(items) => items.iter().try_for_each(reject_non_finite),
        ciborium::Value::Map(entries) => entries.iter().try_for_each(|(key, value)| {
            reject_non_finite(key)?;
            reject_non_finite(value)
        }),
        ciborium::Value::Tag(_, inner) => reject_non_finite(inner),
        _ => Ok(()),
    }
}

/// Encodes a response value as JSON.
pub fn encode_ack_json(raw: &Value) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(raw).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Encodes a response value as CBOR.
pub fn encode_ack_cbor(raw: &Value) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(raw, &mut bytes).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(bytes)
}

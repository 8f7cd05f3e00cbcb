use serde_json::Value;
use tracing::debug;
use vack_codec::error::CodecError;
use vack_codec::frame::{decode_ack_frame, AckFrame};
use vack_codec::wire::WireFormat;
use vack_core::{AckError, AckResult};

use crate::config::AckOptions;
use crate::state::VersionedState;

fn invalid_response(options: &AckOptions, err: &CodecError) -> AckError {
    debug!(error = %err, "rejected malformed acknowledgment");
    AckError::InvalidResponse(options.messages.invalid_response.clone())
}

/// Applies a versioned acknowledgment to `state`.
///
/// The response is validated before any state callback runs. On
/// `success` and `version-mismatch` the value is applied (or reported as
/// invalid) and then the version is applied; a `version-mismatch` is
/// returned as [`AckError::VersionMismatch`] only after both have happened.
/// An `error` outcome never touches `state`.
pub fn apply_versioned_ack<S>(
    raw: &Value,
    options: &AckOptions,
    state: &mut S,
) -> Result<(), AckError>
where
    S: VersionedState + ?Sized,
{
    let frame =
        decode_ack_frame(raw, &options.value_key).map_err(|e| invalid_response(options, &e))?;

    match frame {
        AckFrame::Versioned {
            result,
            version,
            value,
        } => {
            match value {
                None => state.apply_value(None),
                Some(raw_value) => match state.parse_value(raw_value) {
                    Some(parsed) => state.apply_value(Some(parsed)),
                    None => state.log_invalid_value(result, version),
                },
            }
            state.apply_version(version);
            debug!(%result, %version, "applied versioned acknowledgment");

            match result {
                AckResult::Success => Ok(()),
                AckResult::VersionMismatch => Err(AckError::VersionMismatch(
                    options.messages.version_mismatch.clone(),
                )),
            }
        }
        AckFrame::Error { reason } => {
            debug!(reason, "acknowledgment reported an error");
            Err(AckError::Protocol {
                message: options.messages.error.clone(),
                reason: reason.to_string(),
            })
        }
    }
}

/// Decodes acknowledgment bytes in `format` and applies them.
///
/// Undecodable bytes are reported as [`AckError::InvalidResponse`].
pub fn apply_versioned_ack_bytes<S>(
    format: WireFormat,
    bytes: &[u8],
    options: &AckOptions,
    state: &mut S,
) -> Result<(), AckError>
where
    S: VersionedState + ?Sized,
{
    let raw = format
        .decode(bytes)
        .map_err(|e| invalid_response(options, &e))?;
    apply_versioned_ack(&raw, options, state)
}

pub fn apply_versioned_ack_json<S>(
    bytes: &[u8],
    options: &AckOptions,
    state: &mut S,
) -> Result<(), AckError>
where
    S: VersionedState + ?Sized,
{
    apply_versioned_ack_bytes(WireFormat::Json, bytes, options, state)
}

pub fn apply_versioned_ack_cbor<S>(
    bytes: &[u8],
    options: &AckOptions,
    state: &mut S,
) -> Result<(), AckError>
where
    S: VersionedState + ?Sized,
{
    apply_versioned_ack_bytes(WireFormat::Cbor, bytes, options, state)
}

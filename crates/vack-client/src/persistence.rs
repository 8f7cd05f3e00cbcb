use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::state::VersionedSlot;

/// Errors returned by slot persistence helpers.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode slot: {0}")]
    Encode(serde_json::Error),
    #[error("failed to decode slot: {0}")]
    Decode(serde_json::Error),
    #[error("failed to read slot file: {0}")]
    Read(std::io::Error),
    #[error("failed to write slot file: {0}")]
    Write(std::io::Error),
}

/// Encodes a [`VersionedSlot`] as pretty-printed JSON.
pub fn encode_slot_json<T: Serialize>(
    slot: &VersionedSlot<T>,
) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec_pretty(slot).map_err(PersistenceError::Encode)
}

pub fn decode_slot_json<T: DeserializeOwned>(
    bytes: &[u8],
) -> Result<VersionedSlot<T>, PersistenceError> {
    serde_json::from_slice(bytes).map_err(PersistenceError::Decode)
}

/// Saves a slot to `path`, replacing it atomically via a temp file.
pub fn save_slot_to_path<T: Serialize>(
    path: impl AsRef<Path>,
    slot: &VersionedSlot<T>,
) -> Result<(), PersistenceError> {
    let bytes = encode_slot_json(slot)?;
    let path = path.as_ref();
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).map_err(PersistenceError::Write)?;
    fs::rename(&tmp, path).map_err(PersistenceError::Write)
}

pub fn load_slot_from_path<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<VersionedSlot<T>, PersistenceError> {
    let bytes = fs::read(path.as_ref()).map_err(PersistenceError::Read)?;
    decode_slot_json(&bytes)
}

/// Loads a slot if the file exists; otherwise returns an empty slot at version 0.
pub fn load_slot_or_default<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<VersionedSlot<T>, PersistenceError> {
    if !path.as_ref().exists() {
        return Ok(VersionedSlot::default());
    }
    load_slot_from_path(path)
}

//! VACK wire codec primitives.
//!
//! Decodes raw acknowledgment bytes (JSON or CBOR) into untyped values,
//! validates their shape into tagged frames, and builds responses.

pub mod error;
pub mod frame;
pub mod response;
pub mod wire;

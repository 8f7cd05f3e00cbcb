//! Core VACK primitives shared across crates.
//!
//! Includes the version counter, outcome tags, wire field names, and the
//! failure type surfaced by acknowledgment processing.

pub mod error;
pub mod types;

pub use error::AckError;
pub use types::{
    AckOutcome, AckResult, Version, FIELD_REASON, FIELD_RESULT, FIELD_VERSION, RESERVED_FIELDS,
    UNKNOWN_REASON,
};

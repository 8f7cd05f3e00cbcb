//! VACK client-side acknowledgment handling.
//!
//! This crate validates versioned acknowledgments, forwards their version
//! and value into caller-owned state, and converts protocol outcomes into
//! [`vack_core::AckError`].

pub mod ack;
pub mod config;
pub mod persistence;
pub mod state;

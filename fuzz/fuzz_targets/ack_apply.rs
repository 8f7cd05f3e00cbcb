#![no_main]

use libfuzzer_sys::fuzz_target;
use vack_client::ack::{apply_versioned_ack_cbor, apply_versioned_ack_json};
use vack_client::config::AckOptions;
use vack_client::state::VersionedSlot;

fuzz_target!(|data: &[u8]| {
    let options = AckOptions::default();

    let mut slot: VersionedSlot<String> = VersionedSlot::default();
    let before = slot.clone();
    if let Err(err) = apply_versioned_ack_json(data, &options, &mut slot) {
        if !err.state_applied() {
            assert_eq!(slot, before);
        }
    }

    let mut slot: VersionedSlot<String> = VersionedSlot::default();
    if let Err(err) = apply_versioned_ack_cbor(data, &options, &mut slot) {
        if !err.state_applied() {
            assert_eq!(slot, before);
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use vack_codec::frame::decode_ack_frame;
use vack_codec::wire::{decode_ack_cbor, decode_ack_json};

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = decode_ack_json(data) {
        let _ = decode_ack_frame(&raw, "value");
    }
    if let Ok(raw) = decode_ack_cbor(data) {
        let _ = decode_ack_frame(&raw, "value");
    }
});

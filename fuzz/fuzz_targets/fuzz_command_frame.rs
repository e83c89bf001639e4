//! Fuzz target: command frame screening and decoding.
//!
//! Drives arbitrary byte sequences through `screen` + `decode` and asserts
//! that nothing panics, that only exact 11-byte marker frames pass the
//! screen, and that decoding is total over screened frames.
//!
//! cargo fuzz run fuzz_command_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use netdaq::app::commands::{self, FRAME_LEN, FRAME_MARKER};

fuzz_target!(|data: &[u8]| {
    match commands::screen(data) {
        Some(frame) => {
            // The screen must only pass exact marker frames.
            assert_eq!(data.len(), FRAME_LEN);
            assert_eq!(frame[0], FRAME_MARKER);
            // Decoding a screened frame never panics; unknown codes are None.
            let _ = commands::decode(frame);
        }
        None => {
            assert!(data.len() != FRAME_LEN || data[0] != FRAME_MARKER);
        }
    }
});

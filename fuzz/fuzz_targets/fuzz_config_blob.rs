//! Fuzz target: configuration blob codec.
//!
//! Feeds arbitrary 16-byte blobs to the deserializer and asserts the
//! sentinel gate plus serialize/deserialize identity for accepted blobs.
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use netdaq::config::{CONFIG_BLOB_LEN, CONFIG_VALID, DeviceConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(blob) = <&[u8; CONFIG_BLOB_LEN]>::try_from(data) else {
        return;
    };
    match DeviceConfig::from_bytes(blob) {
        Some(cfg) => {
            assert_eq!(blob[0], CONFIG_VALID);
            assert_eq!(&cfg.to_bytes(), blob, "round trip must be identity");
        }
        None => assert_ne!(blob[0], CONFIG_VALID),
    }
});

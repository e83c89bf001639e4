//! Device identity/configuration record.
//!
//! A single 16-byte record persisted in non-volatile storage and held in
//! memory for the lifetime of the process. Loaded once at boot, mutated only
//! by command handlers, written back only on an explicit commit command —
//! never automatically.
//!
//! Persisted blob layout (fixed offsets, the codec below is the only
//! authority on this format):
//!
//! | offset | size | field           | encoding   |
//! |--------|------|-----------------|------------|
//! | 0      | 1    | sentinel        | 0xCD valid |
//! | 1      | 6    | mac             | raw octets |
//! | 7      | 4    | ip              | raw octets |
//! | 11     | 2    | port            | BE u16     |
//! | 13     | 1    | device_id       | raw        |
//! | 14     | 2    | sample_delay_ms | BE u16     |

use log::info;

use crate::app::ports::{StorageError, StoragePort};

/// Sentinel marking a stored record as previously initialized.
pub const CONFIG_VALID: u8 = 0xCD;

/// Size of the serialized record.
pub const CONFIG_BLOB_LEN: usize = 16;

const OFF_SENTINEL: usize = 0;
const OFF_MAC: usize = 1;
const OFF_IP: usize = 7;
const OFF_PORT: usize = 11;
const OFF_DEVICE_ID: usize = 13;
const OFF_SAMPLE_DELAY: usize = 14;

/// The in-memory configuration record.
///
/// Fields are public and mutated in place by the command dispatcher. Values
/// are stored verbatim — the protocol performs no range validation on any of
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Whether the record is initialized. An invalid record is never
    /// persisted by [`commit`](DeviceConfig::commit).
    pub valid: bool,
    /// Link-layer address used at bring-up.
    pub mac: [u8; 6],
    /// Network address used at bring-up.
    pub ip: [u8; 4],
    /// UDP port the device listens on and replies from.
    pub port: u16,
    /// Identifier embedded in every sweep packet.
    pub device_id: u8,
    /// Per-sample software delay during a sweep.
    pub sample_delay_ms: u16,
}

impl Default for DeviceConfig {
    /// Factory defaults, applied whenever the stored record is absent or
    /// carries a bad sentinel.
    fn default() -> Self {
        Self {
            valid: true,
            mac: [0x02, 0x01, 0x01, 0x01, 0x01, 0x01],
            ip: [192, 168, 1, 151],
            port: 10001,
            device_id: 1,
            sample_delay_ms: 0,
        }
    }
}

impl DeviceConfig {
    /// Serialize to the fixed blob layout.
    pub fn to_bytes(&self) -> [u8; CONFIG_BLOB_LEN] {
        let mut blob = [0u8; CONFIG_BLOB_LEN];
        blob[OFF_SENTINEL] = if self.valid { CONFIG_VALID } else { 0x00 };
        blob[OFF_MAC..OFF_MAC + 6].copy_from_slice(&self.mac);
        blob[OFF_IP..OFF_IP + 4].copy_from_slice(&self.ip);
        blob[OFF_PORT..OFF_PORT + 2].copy_from_slice(&self.port.to_be_bytes());
        blob[OFF_DEVICE_ID] = self.device_id;
        blob[OFF_SAMPLE_DELAY..OFF_SAMPLE_DELAY + 2]
            .copy_from_slice(&self.sample_delay_ms.to_be_bytes());
        blob
    }

    /// Deserialize from the fixed blob layout.
    ///
    /// Returns `None` if the sentinel does not match [`CONFIG_VALID`] — the
    /// region is treated as uninitialized, not as an error.
    pub fn from_bytes(blob: &[u8; CONFIG_BLOB_LEN]) -> Option<Self> {
        if blob[OFF_SENTINEL] != CONFIG_VALID {
            return None;
        }
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&blob[OFF_MAC..OFF_MAC + 6]);
        let mut ip = [0u8; 4];
        ip.copy_from_slice(&blob[OFF_IP..OFF_IP + 4]);
        Some(Self {
            valid: true,
            mac,
            ip,
            port: u16::from_be_bytes([blob[OFF_PORT], blob[OFF_PORT + 1]]),
            device_id: blob[OFF_DEVICE_ID],
            sample_delay_ms: u16::from_be_bytes([
                blob[OFF_SAMPLE_DELAY],
                blob[OFF_SAMPLE_DELAY + 1],
            ]),
        })
    }

    /// Load the record from persistent storage.
    ///
    /// A missing block, a short storage region, or a sentinel mismatch all
    /// mean "first boot": the factory defaults are returned, marked valid in
    /// memory only. No write-back happens here — the defaults reach storage
    /// only through an explicit commit command. This operation cannot fail.
    pub fn load(storage: &impl StoragePort) -> Self {
        let mut blob = [0u8; CONFIG_BLOB_LEN];
        match storage.read_block(&mut blob) {
            Ok(()) => match Self::from_bytes(&blob) {
                Some(cfg) => {
                    info!(
                        "config: loaded (id={} port={} delay={}ms)",
                        cfg.device_id, cfg.port, cfg.sample_delay_ms
                    );
                    cfg
                }
                None => {
                    info!("config: stored record uninitialized, using factory defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!("config: no stored record, using factory defaults");
                Self::default()
            }
        }
    }

    /// Write the record to persistent storage.
    ///
    /// No-op when the in-memory record is not valid — guards against
    /// persisting garbage before the first successful load.
    pub fn commit(&self, storage: &mut impl StoragePort) -> Result<(), StorageError> {
        if !self.valid {
            return Ok(());
        }
        storage.write_block(&self.to_bytes())
    }
}

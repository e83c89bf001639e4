//! Device service — the command dispatcher.
//!
//! [`DeviceService`] owns the single configuration record and interprets
//! screened command frames. It is **transport-decoupled**: callers feed it
//! one frame at a time and transmit whatever packet it returns. All I/O
//! flows through port traits injected at the call site, making the entire
//! dispatch chain testable with mock adapters.
//!
//! ```text
//!   AdcPort+DelayPort ──▶ ┌───────────────────────┐ ──▶ EventSink
//!                         │     DeviceService      │
//!   StoragePort ◀─────────│  config · dispatch     │────▶ LinkPort (reinit)
//!                         └───────────────────────┘
//! ```
//!
//! The dispatcher holds no state beyond the configuration record; each frame
//! is handled to completion before the next one is polled. Malformed frames
//! never reach it (see [`commands::screen`](super::commands::screen)), and an
//! unrecognized code is ignored without a reply — both by protocol contract.

use log::warn;

use crate::acquisition::{SweepPacket, run_sweep};
use crate::config::DeviceConfig;

use super::commands::{self, Command, FRAME_LEN};
use super::events::{AppEvent, ConfigField};
use super::ports::{AdcPort, DelayPort, EventSink, LinkPort, StoragePort};

/// Owns the configuration record and dispatches command frames.
pub struct DeviceService {
    config: DeviceConfig,
}

impl DeviceService {
    /// Construct the service around a loaded configuration record.
    pub fn new(config: DeviceConfig) -> Self {
        Self { config }
    }

    /// Announce the identity this service answers with.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            device_id: self.config.device_id,
            port: self.config.port,
        });
    }

    /// The live configuration record.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Dispatch one screened command frame.
    ///
    /// Returns the sweep packet to transmit back to the requester (command
    /// 1), or `None` for every other command. Storage and link errors during
    /// a commit are logged and swallowed — this subsystem has no fatal
    /// states.
    ///
    /// The `hw` parameter satisfies both [`AdcPort`] and [`DelayPort`]; a
    /// sweep blocks here until it completes.
    pub fn handle_frame(
        &mut self,
        frame: &[u8; FRAME_LEN],
        hw: &mut (impl AdcPort + DelayPort),
        link: &mut impl LinkPort,
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) -> Option<SweepPacket> {
        match commands::decode(frame)? {
            Command::RunSweep => {
                let packet = run_sweep(&self.config, hw);
                sink.emit(&AppEvent::SweepCompleted {
                    device_id: packet.device_id(),
                    checksum: packet.checksum(),
                });
                Some(packet)
            }
            Command::SetDeviceId(id) => {
                self.config.device_id = id;
                sink.emit(&AppEvent::ConfigUpdated(ConfigField::DeviceId(id)));
                None
            }
            Command::SetIp(ip) => {
                self.config.ip = ip;
                sink.emit(&AppEvent::ConfigUpdated(ConfigField::Ip(ip)));
                None
            }
            Command::SetMac(mac) => {
                self.config.mac = mac;
                sink.emit(&AppEvent::ConfigUpdated(ConfigField::Mac(mac)));
                None
            }
            Command::SetSampleDelay(ms) => {
                self.config.sample_delay_ms = ms;
                sink.emit(&AppEvent::ConfigUpdated(ConfigField::SampleDelayMs(ms)));
                None
            }
            Command::Commit => {
                match self.config.commit(storage) {
                    Ok(()) => sink.emit(&AppEvent::ConfigCommitted),
                    Err(e) => warn!("config commit failed: {}", e),
                }
                // Re-initialization uses whatever mac/ip are in memory right
                // now — including values changed moments ago and just
                // committed above.
                match link.reinit(self.config.mac, self.config.ip) {
                    Ok(()) => sink.emit(&AppEvent::LinkReinitialized {
                        mac: self.config.mac,
                        ip: self.config.ip,
                    }),
                    Err(e) => warn!("link reinit failed: {}", e),
                }
                None
            }
        }
    }
}

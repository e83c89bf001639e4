//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (UART / USB-CDC in production). A future telemetry adapter would
//! implement the same trait.

use log::info;

use crate::app::events::{AppEvent, ConfigField};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { device_id, port } => {
                info!("START | id={} port={}", device_id, port);
            }
            AppEvent::SweepCompleted {
                device_id,
                checksum,
            } => {
                info!("SWEEP | id={} checksum={:#04x}", device_id, checksum);
            }
            AppEvent::ConfigUpdated(field) => match field {
                ConfigField::DeviceId(id) => info!("CONF  | device_id={}", id),
                ConfigField::Ip(ip) => {
                    info!("CONF  | ip={}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]);
                }
                ConfigField::Mac(m) => {
                    info!(
                        "CONF  | mac={:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
                        m[0], m[1], m[2], m[3], m[4], m[5]
                    );
                }
                ConfigField::SampleDelayMs(ms) => info!("CONF  | sample_delay={}ms", ms),
            },
            AppEvent::ConfigCommitted => {
                info!("CONF  | committed to NVS");
            }
            AppEvent::LinkReinitialized { mac, ip } => {
                info!(
                    "LINK  | reinit mac={:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X} ip={}.{}.{}.{}",
                    mac[0], mac[1], mac[2], mac[3], mac[4], mac[5], ip[0], ip[1], ip[2], ip[3]
                );
            }
        }
    }
}

//! Outbound application events.
//!
//! The [`DeviceService`](super::service::DeviceService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them — log to serial, blink an LED, record
//! them in a test.
//!
//! Silent protocol outcomes (malformed frame, unknown code) emit nothing.

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service came up (carries the identity it will answer with).
    Started { device_id: u8, port: u16 },

    /// A sweep finished and its packet is about to be transmitted.
    SweepCompleted { device_id: u8, checksum: u8 },

    /// A configuration field was changed in memory.
    ConfigUpdated(ConfigField),

    /// The configuration record was written to persistent storage.
    ConfigCommitted,

    /// The network link was re-initialized with the given addresses.
    LinkReinitialized { mac: [u8; 6], ip: [u8; 4] },
}

/// Which field a `ConfigUpdated` event touched, with the new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    DeviceId(u8),
    Ip([u8; 4]),
    Mac([u8; 6]),
    SampleDelayMs(u16),
}

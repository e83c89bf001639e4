//! Port traits — the hexagonal boundary between domain logic and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DeviceService (domain)
//! ```
//!
//! Driven adapters (ADC, delay source, storage, network link, event sinks)
//! implement these traits. The [`DeviceService`](super::service::DeviceService)
//! and the acquisition sequencer consume them via generics, so the domain
//! core never touches hardware directly.

use crate::config::CONFIG_BLOB_LEN;

/// Largest inbound datagram payload the link hands to the receive loop.
/// Command frames are 11 bytes; anything longer is screened out anyway, so
/// truncation at this capacity never turns an invalid payload into a valid
/// one.
pub const MAX_DATAGRAM: usize = 128;

// ───────────────────────────────────────────────────────────────
// ADC port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One acquisition channel. The sweep order {A, B, C} is fixed — downstream
/// consumers decode rows positionally, not by a channel tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    A,
    B,
    C,
}

impl Channel {
    /// Sweep order.
    pub const ALL: [Channel; 3] = [Channel::A, Channel::B, Channel::C];

    /// Position of this channel inside a packet row.
    pub const fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
            Channel::C => 2,
        }
    }
}

/// Blocking analog conversion: select the channel, start the conversion,
/// block until complete, return the raw sample. Synchronous and non-failing
/// from the domain's point of view.
pub trait AdcPort {
    fn read_channel(&mut self, channel: Channel) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Delay port (scheduling boundary)
// ───────────────────────────────────────────────────────────────

/// Blocking delay. The sequencer calls this between sample rows; the whole
/// control model is cooperative, so blocking here blocks everything.
pub trait DelayPort {
    fn delay_ms(&mut self, ms: u16);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ non-volatile storage)
// ───────────────────────────────────────────────────────────────

/// The persistent configuration region: a fixed-size block at a fixed
/// location. Read once at boot, written only on an explicit commit.
pub trait StoragePort {
    /// Read the block. `Err(StorageError::NotFound)` means the region has
    /// never been written (first boot) — callers treat that as "use
    /// defaults", not as a failure.
    fn read_block(&self, buf: &mut [u8; CONFIG_BLOB_LEN]) -> Result<(), StorageError>;

    /// Write the block atomically.
    fn write_block(&mut self, data: &[u8; CONFIG_BLOB_LEN]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Network link port (driven adapter: domain ↔ UDP link)
// ───────────────────────────────────────────────────────────────

/// Source address of an inbound datagram / destination of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddr {
    pub ip: [u8; 4],
    pub port: u16,
}

/// An inbound datagram payload plus where it came from. The link layer has
/// already handled everything below UDP (ARP, ICMP echo, reassembly).
#[derive(Debug, Clone)]
pub struct Datagram {
    pub peer: PeerAddr,
    pub payload: heapless::Vec<u8, MAX_DATAGRAM>,
}

/// The UDP link boundary. The domain never sees sockets or frames — it polls
/// for payloads and hands back reply bytes.
pub trait LinkPort {
    /// Poll for one inbound datagram. `None` means nothing arrived within
    /// the adapter's (short) poll window. Datagrams arriving while the
    /// single thread is busy elsewhere are dropped by the link, not queued.
    fn poll(&mut self) -> Option<Datagram>;

    /// Send `payload` to `peer`, sourced from the device's configured port.
    fn send(&mut self, peer: PeerAddr, payload: &[u8]) -> Result<(), LinkError>;

    /// Re-initialize the link with the given addresses. Must be safe to call
    /// repeatedly; always takes effect with the values passed here.
    fn reinit(&mut self, mac: [u8; 6], ip: [u8; 4]) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, a future
/// telemetry channel, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The region has never been written.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`LinkPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The link has not been initialized yet.
    NotReady,
    /// Transmission failed at the socket/driver layer.
    SendFailed,
    /// (Re-)initialization of the MAC/netif failed.
    InitFailed,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "block not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotReady => write!(f, "link not initialized"),
            Self::SendFailed => write!(f, "send failed"),
            Self::InitFailed => write!(f, "link init failed"),
        }
    }
}

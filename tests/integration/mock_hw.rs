//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full interaction
//! history without touching real ADC registers, NVS flash, or sockets.

use std::collections::VecDeque;

use netdaq::app::events::AppEvent;
use netdaq::app::ports::{
    AdcPort, Channel, Datagram, DelayPort, EventSink, LinkError, LinkPort, PeerAddr, StorageError,
    StoragePort,
};
use netdaq::config::CONFIG_BLOB_LEN;

// ── MockHardware (AdcPort + DelayPort) ───────────────────────

/// Scripted ADC and delay recorder.
///
/// Readings come from `script` first (popped in call order); once the
/// script is exhausted, each channel returns its `fallback` value. Delays
/// are recorded, never slept.
pub struct MockHardware {
    pub script: VecDeque<u16>,
    pub fallback: [u16; 3],
    pub reads: Vec<Channel>,
    pub delays: Vec<u16>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn flat(fallback: [u16; 3]) -> Self {
        Self {
            script: VecDeque::new(),
            fallback,
            reads: Vec::new(),
            delays: Vec::new(),
        }
    }

    pub fn scripted(script: impl IntoIterator<Item = u16>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: [0; 3],
            reads: Vec::new(),
            delays: Vec::new(),
        }
    }
}

impl AdcPort for MockHardware {
    fn read_channel(&mut self, channel: Channel) -> u16 {
        self.reads.push(channel);
        self.script
            .pop_front()
            .unwrap_or(self.fallback[channel.index()])
    }
}

impl DelayPort for MockHardware {
    fn delay_ms(&mut self, ms: u16) {
        self.delays.push(ms);
    }
}

// ── MockStorage (StoragePort) ────────────────────────────────

/// Fixed-block store with a write counter.
#[derive(Default)]
pub struct MockStorage {
    pub block: Option<[u8; CONFIG_BLOB_LEN]>,
    pub writes: usize,
}

#[allow(dead_code)]
impl MockStorage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(block: [u8; CONFIG_BLOB_LEN]) -> Self {
        Self {
            block: Some(block),
            writes: 0,
        }
    }
}

impl StoragePort for MockStorage {
    fn read_block(&self, buf: &mut [u8; CONFIG_BLOB_LEN]) -> Result<(), StorageError> {
        match self.block {
            Some(b) => {
                buf.copy_from_slice(&b);
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write_block(&mut self, data: &[u8; CONFIG_BLOB_LEN]) -> Result<(), StorageError> {
        self.block = Some(*data);
        self.writes += 1;
        Ok(())
    }
}

// ── MockLink (LinkPort) ──────────────────────────────────────

/// Link that serves queued inbound datagrams and records every send and
/// reinit.
#[derive(Default)]
pub struct MockLink {
    pub inbound: VecDeque<Datagram>,
    pub sent: Vec<(PeerAddr, Vec<u8>)>,
    pub reinits: Vec<([u8; 6], [u8; 4])>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&mut self, peer: PeerAddr, payload: &[u8]) {
        let mut p = heapless::Vec::new();
        p.extend_from_slice(payload).unwrap();
        self.inbound.push_back(Datagram { peer, payload: p });
    }
}

impl LinkPort for MockLink {
    fn poll(&mut self) -> Option<Datagram> {
        self.inbound.pop_front()
    }

    fn send(&mut self, peer: PeerAddr, payload: &[u8]) -> Result<(), LinkError> {
        self.sent.push((peer, payload.to_vec()));
        Ok(())
    }

    fn reinit(&mut self, mac: [u8; 6], ip: [u8; 4]) -> Result<(), LinkError> {
        self.reinits.push((mac, ip));
        Ok(())
    }
}

// ── RecordingSink (EventSink) ────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

//! The acquisition sequencer.
//!
//! One sweep fills a [`SweepPacket`] with 64 rows of three channel readings
//! and seals it. The sequence is deterministic and blocking: the ADC
//! conversion and the per-row delay are synchronous injected capabilities,
//! and nothing else runs until the sweep completes. A sweep either runs to
//! completion or not at all — there is no partial-sweep state.

use crate::app::ports::{AdcPort, Channel, DelayPort};
use crate::config::DeviceConfig;

use super::packet::{ROWS, SweepPacket};

/// Run one full sweep and return the completed packet.
///
/// Per row, channels are read in the fixed order A, B, C, then the
/// configured per-sample delay blocks the loop (skipped when zero). The
/// checksum is applied exactly once, after every other byte is in place.
///
/// The `hw` parameter satisfies **both** [`AdcPort`] and [`DelayPort`] —
/// this avoids a double mutable borrow while keeping the port boundary
/// explicit.
pub fn run_sweep(cfg: &DeviceConfig, hw: &mut (impl AdcPort + DelayPort)) -> SweepPacket {
    let mut packet = SweepPacket::new();
    packet.write_header(cfg.device_id, cfg.sample_delay_ms);

    for row in 0..ROWS {
        for channel in Channel::ALL {
            let raw = hw.read_channel(channel);
            packet.write_reading(row, channel, raw);
        }
        if cfg.sample_delay_ms > 0 {
            hw.delay_ms(cfg.sample_delay_ms);
        }
    }

    packet.seal();
    packet
}

//! Acquisition core: the fixed-layout sweep packet and the sequencer that
//! fills it.

pub mod packet;
pub mod sweep;

pub use packet::SweepPacket;
pub use sweep::run_sweep;

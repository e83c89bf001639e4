//! Command frame format.
//!
//! Wire format, exactly 11 bytes:
//! ```text
//! ┌───────────┬──────────┬───────────────────────────┐
//! │ 0xBC (1B) │ code (1B)│ arguments (9B, code-dep.) │
//! └───────────┴──────────┴───────────────────────────┘
//! ```
//!
//! [`screen`] is the pre-dispatch gate: payloads of the wrong length or
//! without the marker byte are dropped before the dispatcher ever sees them
//! — no reply, no log. [`decode`] maps a screened frame to a [`Command`];
//! an unrecognized code decodes to `None` and is silently ignored.
//!
//! Argument bytes are taken verbatim. The protocol performs no range
//! validation — any id, any ip/mac octets, any delay are legal and take
//! effect as-is.

/// Protocol marker, byte 0 of every command frame.
pub const FRAME_MARKER: u8 = 0xBC;

/// Exact length of a command frame.
pub const FRAME_LEN: usize = 11;

/// A decoded device command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run a full acquisition sweep and reply with the packet.
    RunSweep,
    /// Set the device id embedded in sweep packets.
    SetDeviceId(u8),
    /// Set the IP address used at the next link (re-)initialization.
    SetIp([u8; 4]),
    /// Set the MAC address used at the next link (re-)initialization.
    SetMac([u8; 6]),
    /// Set the per-sample sweep delay, in milliseconds.
    SetSampleDelay(u16),
    /// Persist the configuration record, then re-initialize the link.
    Commit,
}

/// Pre-dispatch gate: accept only payloads of exactly [`FRAME_LEN`] bytes
/// starting with [`FRAME_MARKER`]. Everything else is dropped here, before
/// the dispatcher.
pub fn screen(payload: &[u8]) -> Option<&[u8; FRAME_LEN]> {
    let frame: &[u8; FRAME_LEN] = payload.try_into().ok()?;
    if frame[0] != FRAME_MARKER {
        return None;
    }
    Some(frame)
}

/// Decode the command code and arguments from a screened frame.
///
/// Returns `None` for an unrecognized code (silently ignored upstream).
pub fn decode(frame: &[u8; FRAME_LEN]) -> Option<Command> {
    match frame[1] {
        1 => Some(Command::RunSweep),
        2 => Some(Command::SetDeviceId(frame[2])),
        3 => Some(Command::SetIp([frame[2], frame[3], frame[4], frame[5]])),
        4 => Some(Command::SetMac([
            frame[2], frame[3], frame[4], frame[5], frame[6], frame[7],
        ])),
        // The delay argument occupies bytes 3..4 (high byte first), not
        // 2..3 like the other single-field commands. Deployed hosts encode
        // it exactly this way — do not "fix" the offset or the byte order.
        5 => Some(Command::SetSampleDelay(
            (u16::from(frame[3]) << 8) | u16::from(frame[4]),
        )),
        0xF => Some(Command::Commit),
        _ => None,
    }
}

//! Integration tests for the full receive path: datagram → screen →
//! dispatch → reply, exactly as the firmware's receive loop wires it.

use netdaq::acquisition::packet::PACKET_LEN;
use netdaq::app::commands::{self, FRAME_LEN, FRAME_MARKER};
use netdaq::app::events::{AppEvent, ConfigField};
use netdaq::app::ports::{Channel, LinkPort, PeerAddr};
use netdaq::app::service::DeviceService;
use netdaq::config::DeviceConfig;

use crate::mock_hw::{MockHardware, MockLink, MockStorage, RecordingSink};

const PEER: PeerAddr = PeerAddr {
    ip: [192, 168, 1, 10],
    port: 34567,
};

struct Harness {
    service: DeviceService,
    hw: MockHardware,
    link: MockLink,
    storage: MockStorage,
    sink: RecordingSink,
}

impl Harness {
    fn new() -> Self {
        Self {
            service: DeviceService::new(DeviceConfig::default()),
            hw: MockHardware::flat([0x0100, 0x0200, 0x0300]),
            link: MockLink::new(),
            storage: MockStorage::empty(),
            sink: RecordingSink::new(),
        }
    }

    /// Drain the link queue through the same path as the firmware loop:
    /// poll → screen → dispatch → transmit reply.
    fn pump(&mut self) {
        while let Some(dgram) = self.link.poll() {
            let Some(frame) = commands::screen(&dgram.payload) else {
                continue;
            };
            if let Some(packet) = self.service.handle_frame(
                frame,
                &mut self.hw,
                &mut self.link,
                &mut self.storage,
                &mut self.sink,
            ) {
                self.link.send(dgram.peer, packet.as_bytes()).unwrap();
            }
        }
    }

    fn queue_frame(&mut self, code: u8, args: &[u8]) {
        let mut f = [0u8; FRAME_LEN];
        f[0] = FRAME_MARKER;
        f[1] = code;
        f[2..2 + args.len()].copy_from_slice(args);
        self.link.queue(PEER, &f);
    }
}

// ── Command 1: sweep + reply ─────────────────────────────────

#[test]
fn sweep_command_replies_with_a_402_byte_packet_to_the_requester() {
    let mut h = Harness::new();
    h.queue_frame(1, &[]);
    h.pump();

    assert_eq!(h.link.sent.len(), 1);
    let (peer, bytes) = &h.link.sent[0];
    assert_eq!(*peer, PEER);
    assert_eq!(bytes.len(), PACKET_LEN);
    assert_eq!(bytes[0], 0xBF);
    assert_eq!(bytes[401], 0xFB);

    let manual: u8 = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 400)
        .fold(0u8, |acc, (_, b)| acc.wrapping_add(*b));
    assert_eq!(bytes[400], manual);

    assert!(
        h.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::SweepCompleted { device_id: 1, .. }))
    );
}

#[test]
fn sweep_rows_carry_the_scripted_channel_triples() {
    let mut h = Harness::new();
    h.hw = MockHardware::flat([0x0001, 0x0002, 0x0003]);
    h.queue_frame(1, &[]);
    h.pump();

    let bytes = &h.link.sent[0].1;
    for row in 0..64 {
        let off = 2 + 6 * row;
        assert_eq!(
            &bytes[off..off + 6],
            &[0x00, 0x01, 0x00, 0x02, 0x00, 0x03],
            "row {row}"
        );
    }
    assert_eq!(h.hw.reads.len(), 192);
    assert_eq!(h.hw.reads[0], Channel::A);
    assert_eq!(h.hw.reads[1], Channel::B);
    assert_eq!(h.hw.reads[2], Channel::C);
}

#[test]
fn two_sweeps_over_the_same_collaborator_are_byte_identical() {
    let mut h = Harness::new();
    h.queue_frame(1, &[]);
    h.queue_frame(1, &[]);
    h.pump();

    assert_eq!(h.link.sent.len(), 2);
    assert_eq!(h.link.sent[0].1, h.link.sent[1].1);
}

#[test]
fn sweep_honours_the_configured_per_row_delay() {
    let mut h = Harness::new();
    // Set delay to 300 ms (args at bytes 3..4, high byte first)...
    h.queue_frame(5, &[0x00, 0x01, 0x2C]);
    // ...then sweep.
    h.queue_frame(1, &[]);
    h.pump();

    assert_eq!(h.hw.delays, vec![300; 64]);
    let bytes = &h.link.sent[0].1;
    assert_eq!(bytes[386], 0x01);
    assert_eq!(bytes[387], 0x2C);
}

// ── Screen: malformed payloads never reach the dispatcher ────

#[test]
fn malformed_payloads_produce_no_reply_no_event_no_mutation() {
    let mut h = Harness::new();
    let before = h.service.config().clone();

    h.link.queue(PEER, &[]); // empty
    h.link.queue(PEER, &[FRAME_MARKER; 10]); // short
    h.link.queue(PEER, &[FRAME_MARKER; 12]); // long
    h.link.queue(PEER, &[0xBD; 11]); // wrong marker
    let mut sweep_like = [0u8; 11];
    sweep_like[1] = 1; // right length, code 1, but marker missing
    h.link.queue(PEER, &sweep_like);
    h.pump();

    assert!(h.link.sent.is_empty());
    assert!(h.sink.events.is_empty());
    assert_eq!(h.service.config(), &before);
    assert_eq!(h.storage.writes, 0);
}

#[test]
fn unknown_command_codes_are_silently_ignored() {
    let mut h = Harness::new();
    let before = h.service.config().clone();
    for code in [0u8, 6, 9, 0xE, 0x10, 0xFF] {
        h.queue_frame(code, &[]);
    }
    h.pump();

    assert!(h.link.sent.is_empty());
    assert!(h.sink.events.is_empty());
    assert_eq!(h.service.config(), &before);
}

// ── Commands 2–5: in-memory mutation only ────────────────────

#[test]
fn set_commands_mutate_memory_without_persisting() {
    let mut h = Harness::new();
    h.queue_frame(2, &[0x37]);
    h.queue_frame(3, &[10, 20, 30, 40]);
    h.queue_frame(4, &[0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F]);
    h.queue_frame(5, &[0x00, 0x02, 0x58]);
    h.pump();

    let cfg = h.service.config();
    assert_eq!(cfg.device_id, 0x37);
    assert_eq!(cfg.ip, [10, 20, 30, 40]);
    assert_eq!(cfg.mac, [0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F]);
    assert_eq!(cfg.sample_delay_ms, 600);

    assert_eq!(h.storage.writes, 0, "mutation must never auto-persist");
    assert!(h.link.sent.is_empty(), "set commands have no reply");
    assert_eq!(
        h.sink.events,
        vec![
            AppEvent::ConfigUpdated(ConfigField::DeviceId(0x37)),
            AppEvent::ConfigUpdated(ConfigField::Ip([10, 20, 30, 40])),
            AppEvent::ConfigUpdated(ConfigField::Mac([0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F])),
            AppEvent::ConfigUpdated(ConfigField::SampleDelayMs(600)),
        ]
    );
}

#[test]
fn out_of_range_looking_arguments_are_stored_verbatim() {
    // The protocol has no argument validation — 0xFF octets and a zero id
    // are all legal and take effect as-is.
    let mut h = Harness::new();
    h.queue_frame(2, &[0x00]);
    h.queue_frame(3, &[255, 255, 255, 255]);
    h.pump();

    assert_eq!(h.service.config().device_id, 0);
    assert_eq!(h.service.config().ip, [255, 255, 255, 255]);
}

// ── Command 15: commit + link reinit ─────────────────────────

#[test]
fn commit_persists_and_reinitializes_the_link_with_live_addresses() {
    let mut h = Harness::new();
    h.queue_frame(4, &[0x02, 0x44, 0x44, 0x44, 0x44, 0x44]);
    h.queue_frame(3, &[10, 0, 0, 99]);
    h.queue_frame(0xF, &[]);
    h.pump();

    assert_eq!(h.storage.writes, 1);
    assert_eq!(
        h.storage.block.unwrap(),
        h.service.config().to_bytes(),
        "persisted image must match the live record"
    );
    assert_eq!(
        h.link.reinits,
        vec![([0x02, 0x44, 0x44, 0x44, 0x44, 0x44], [10, 0, 0, 99])]
    );
    assert!(h.sink.events.contains(&AppEvent::ConfigCommitted));
    assert!(h.sink.events.contains(&AppEvent::LinkReinitialized {
        mac: [0x02, 0x44, 0x44, 0x44, 0x44, 0x44],
        ip: [10, 0, 0, 99],
    }));
}

#[test]
fn repeated_commits_are_safe_and_use_current_state_each_time() {
    let mut h = Harness::new();
    h.queue_frame(0xF, &[]);
    h.queue_frame(3, &[172, 16, 5, 5]);
    h.queue_frame(0xF, &[]);
    h.pump();

    assert_eq!(h.storage.writes, 2);
    assert_eq!(h.link.reinits.len(), 2);
    assert_eq!(h.link.reinits[0].1, [192, 168, 1, 151]);
    assert_eq!(h.link.reinits[1].1, [172, 16, 5, 5]);
}

//! NetDAQ Firmware — Main Entry Point
//!
//! Hexagonal layout with a single-threaded, cooperative receive loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter    EthLink      NvsAdapter    LogEventSink  │
//! │  (Adc+Delay)        (LinkPort)   (StoragePort) (EventSink)   │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌──────────────────────────────────────────────────────┐    │
//! │  │            DeviceService (pure logic)                │    │
//! │  │  config record · command dispatch · sweep sequencer  │    │
//! │  └──────────────────────────────────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One logical loop: poll the link; screen the payload; dispatch; transmit
//! the reply if the command produced one. A sweep blocks the loop until it
//! completes — datagrams arriving meanwhile are dropped at the link layer.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use netdaq::adapters::eth::EthLink;
use netdaq::adapters::hardware::HardwareAdapter;
use netdaq::adapters::log_sink::LogEventSink;
use netdaq::adapters::nvs::NvsAdapter;
use netdaq::app::commands;
use netdaq::app::ports::LinkPort;
use netdaq::app::service::DeviceService;
use netdaq::config::DeviceConfig;
use netdaq::drivers::status_led::StatusLed;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("NetDAQ v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from NVS (or factory defaults) ─────────
    let mut nvs = NvsAdapter::new()
        .map_err(|e| anyhow::anyhow!("NVS init failed: {}", e))?;
    let config = DeviceConfig::load(&nvs);

    // ── 3. Peripherals (ADC, LEDs, W5500) ─────────────────────
    if let Err(e) = netdaq::drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Boot LED pattern ───────────────────────────────────
    let mut hw = HardwareAdapter::new();
    let mut led = StatusLed::new();
    led.boot_pattern(&mut hw);

    // ── 5. Bring up the link with the loaded addresses ────────
    let mut link = EthLink::new(config.port);
    link.reinit(config.mac, config.ip)
        .map_err(|e| anyhow::anyhow!("link bring-up failed: {}", e))?;

    // ── 6. Service + event sink ───────────────────────────────
    let mut sink = LogEventSink::new();
    let mut service = DeviceService::new(config);
    service.start(&mut sink);

    info!("System ready. Entering receive loop.");

    // ── 7. Receive loop ───────────────────────────────────────
    loop {
        let Some(dgram) = link.poll() else {
            continue;
        };

        // Wrong length or missing marker: dropped here, before the
        // dispatcher — no reply, no log.
        let Some(frame) = commands::screen(&dgram.payload) else {
            continue;
        };

        if let Some(packet) = service.handle_frame(frame, &mut hw, &mut link, &mut nvs, &mut sink)
        {
            match link.send(dgram.peer, packet.as_bytes()) {
                Ok(()) => led.toggle_red(),
                Err(e) => warn!("sweep reply to {:?} failed: {}", dgram.peer, e),
            }
        }
    }
}

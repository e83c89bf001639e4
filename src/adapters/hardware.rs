//! Hardware adapter: blocking ADC conversions and delays.
//!
//! Implements [`AdcPort`] and [`DelayPort`] for the acquisition sequencer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the three acquisition inputs through the ADC1 oneshot
//! unit (initialised by `drivers::hw_init`) and delays via the FreeRTOS
//! tick sleep.
//! On host/test: reads per-channel `AtomicU16` injection points and delays
//! via `std::thread::sleep`.

use crate::app::ports::{AdcPort, Channel, DelayPort};

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [AtomicU16; 3] = [AtomicU16::new(0), AtomicU16::new(0), AtomicU16::new(0)];

/// Inject a raw reading for one channel (host builds only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_channel(channel: Channel, raw: u16) {
    SIM_ADC[channel.index()].store(raw, Ordering::Relaxed);
}

/// The board's ADC + delay capabilities as one adapter.
pub struct HardwareAdapter;

impl HardwareAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl AdcPort for HardwareAdapter {
    #[cfg(target_os = "espidf")]
    fn read_channel(&mut self, channel: Channel) -> u16 {
        use crate::drivers::hw_init;
        let ch = match channel {
            Channel::A => hw_init::ADC1_CH_A,
            Channel::B => hw_init::ADC1_CH_B,
            Channel::C => hw_init::ADC1_CH_C,
        };
        hw_init::adc1_read(ch)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_channel(&mut self, channel: Channel) -> u16 {
        SIM_ADC[channel.index()].load(Ordering::Relaxed)
    }
}

impl DelayPort for HardwareAdapter {
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u16) {
        esp_idf_hal::delay::FreeRtos::delay_ms(u32::from(ms));
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u16) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

//! GPIO / peripheral pin assignments for the NetDAQ main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Analog inputs (ADC1 oneshot)
// ---------------------------------------------------------------------------

/// Acquisition channel A input (ADC1_CH3, GPIO4).
pub const CHAN_A_ADC_GPIO: i32 = 4;
/// Acquisition channel B input (ADC1_CH4, GPIO5).
pub const CHAN_B_ADC_GPIO: i32 = 5;
/// Acquisition channel C input (ADC1_CH5, GPIO6).
pub const CHAN_C_ADC_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Status LEDs (discrete, active HIGH)
// ---------------------------------------------------------------------------

/// Green LED: link up / ready.
pub const LED_GREEN_GPIO: i32 = 15;
/// Red LED: boot pattern + reply activity.
pub const LED_RED_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// W5500 Ethernet MAC/PHY (SPI2)
// ---------------------------------------------------------------------------

pub const ETH_SPI_SCLK_GPIO: i32 = 12;
pub const ETH_SPI_MOSI_GPIO: i32 = 11;
pub const ETH_SPI_MISO_GPIO: i32 = 13;
pub const ETH_SPI_CS_GPIO: i32 = 10;
/// W5500 interrupt line (falling edge on frame reception).
pub const ETH_INT_GPIO: i32 = 9;
/// W5500 hardware reset (active LOW).
pub const ETH_RST_GPIO: i32 = 8;

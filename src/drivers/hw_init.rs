//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC1 oneshot unit (three acquisition channels), the status
//! LED GPIOs, and the W5500 Ethernet MAC/PHY on SPI2, using raw ESP-IDF sys
//! calls. Called once from `main()` before the receive loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    EthInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::EthInitFailed(rc) => write!(f, "W5500 Ethernet init failed (rc={})", rc),
        }
    }
}

// ── ADC channel map (logical A/B/C → ADC1 channels) ──────────

#[cfg(target_os = "espidf")]
pub const ADC1_CH_A: adc_channel_t = adc_channel_t_ADC_CHANNEL_3; // GPIO4
#[cfg(target_os = "espidf")]
pub const ADC1_CH_B: adc_channel_t = adc_channel_t_ADC_CHANNEL_4; // GPIO5
#[cfg(target_os = "espidf")]
pub const ADC1_CH_C: adc_channel_t = adc_channel_t_ADC_CHANNEL_5; // GPIO6

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before the receive loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_ethernet()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: must be called only from the single-threaded init path or the
/// main-loop ADC read path. No concurrent access is possible because
/// `init_adc()` completes before the receive loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for ch in [ADC1_CH_A, ADC1_CH_B, ADC1_CH_C] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ch, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }
    Ok(())
}

/// Blocking oneshot conversion on an ADC1 channel. Returns the raw 12-bit
/// sample (0 on a driver error — the acquisition path treats conversions
/// as non-failing).
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: adc_channel_t) -> u16 {
    let mut raw: core::ffi::c_int = 0;
    // SAFETY: oneshot reads are serialized by the single-threaded loop.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret == ESP_OK as i32 { raw as u16 } else { 0 }
}

// ── GPIO outputs (status LEDs) ───────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let mask = (1u64 << pins::LED_GREEN_GPIO) | (1u64 << pins::LED_RED_GPIO);
    let cfg = gpio_config_t {
        pin_bit_mask: mask,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

/// Drive a status LED GPIO. No-op on host targets — the LED driver tracks
/// state in memory for tests.
#[cfg(target_os = "espidf")]
pub fn gpio_set(gpio: i32, level: bool) {
    // SAFETY: pin configured as output in init_gpio_outputs.
    unsafe {
        gpio_set_level(gpio, u32::from(level));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_set(_gpio: i32, _level: bool) {}

// ── W5500 Ethernet (SPI2) ────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ethernet() -> Result<(), HwInitError> {
    let bus_cfg = spi_bus_config_t {
        __bindgen_anon_1: spi_bus_config_t__bindgen_ty_1 {
            mosi_io_num: pins::ETH_SPI_MOSI_GPIO,
        },
        __bindgen_anon_2: spi_bus_config_t__bindgen_ty_2 {
            miso_io_num: pins::ETH_SPI_MISO_GPIO,
        },
        sclk_io_num: pins::ETH_SPI_SCLK_GPIO,
        __bindgen_anon_3: spi_bus_config_t__bindgen_ty_3 { quadwp_io_num: -1 },
        __bindgen_anon_4: spi_bus_config_t__bindgen_ty_4 { quadhd_io_num: -1 },
        ..Default::default()
    };
    let ret = unsafe {
        spi_bus_initialize(
            spi_host_device_t_SPI2_HOST,
            &bus_cfg,
            spi_common_dma_t_SPI_DMA_CH_AUTO,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::EthInitFailed(ret));
    }

    let dev_cfg = spi_device_interface_config_t {
        command_bits: 16,
        address_bits: 8,
        mode: 0,
        clock_speed_hz: 36_000_000,
        spics_io_num: pins::ETH_SPI_CS_GPIO,
        queue_size: 20,
        ..Default::default()
    };
    let w5500_cfg = eth_w5500_config_t {
        spi_host_id: spi_host_device_t_SPI2_HOST,
        spi_devcfg: &dev_cfg as *const _ as *mut _,
        int_gpio_num: pins::ETH_INT_GPIO,
        ..Default::default()
    };
    let mac_cfg = eth_mac_config_t {
        sw_reset_timeout_ms: 100,
        rx_task_stack_size: 4096,
        rx_task_prio: 15,
        flags: 0,
    };
    let mut phy_cfg = eth_phy_config_t {
        phy_addr: -1,
        reset_timeout_ms: 100,
        autonego_timeout_ms: 4000,
        reset_gpio_num: pins::ETH_RST_GPIO,
    };

    let mac = unsafe { esp_eth_mac_new_w5500(&w5500_cfg, &mac_cfg) };
    let phy = unsafe { esp_eth_phy_new_w5500(&mut phy_cfg) };
    if mac.is_null() || phy.is_null() {
        return Err(HwInitError::EthInitFailed(ESP_FAIL));
    }

    let eth_cfg = esp_eth_config_t {
        mac,
        phy,
        check_link_period_ms: 2000,
        ..Default::default()
    };
    let mut eth_handle: esp_eth_handle_t = core::ptr::null_mut();
    let ret = unsafe { esp_eth_driver_install(&eth_cfg, &mut eth_handle) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::EthInitFailed(ret));
    }

    // lwIP netif, keyed "ETH_DEF" — the link adapter programs MAC/IP on it.
    let ret = unsafe { esp_netif_init() };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::EthInitFailed(ret));
    }
    let ret = unsafe { esp_event_loop_create_default() };
    if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE {
        return Err(HwInitError::EthInitFailed(ret));
    }

    let netif_inherent = esp_netif_inherent_config_t {
        flags: esp_netif_flags_ESP_NETIF_FLAG_AUTOUP,
        if_key: b"ETH_DEF\0".as_ptr() as *const _,
        if_desc: b"netdaq eth\0".as_ptr() as *const _,
        route_prio: 50,
        ..Default::default()
    };
    let netif_cfg = esp_netif_config_t {
        base: &netif_inherent,
        driver: core::ptr::null(),
        stack: unsafe { _g_esp_netif_netstack_default_eth },
    };
    let netif = unsafe { esp_netif_new(&netif_cfg) };
    if netif.is_null() {
        return Err(HwInitError::EthInitFailed(ESP_FAIL));
    }

    let glue = unsafe { esp_eth_new_netif_glue(eth_handle) };
    let ret = unsafe { esp_netif_attach(netif, glue as *mut _) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::EthInitFailed(ret));
    }

    let ret = unsafe { esp_eth_start(eth_handle) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::EthInitFailed(ret));
    }

    info!("hw_init: W5500 Ethernet driver started");
    Ok(())
}

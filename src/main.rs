//! Bowlwatch Firmware: Main Entry Point
//!
//! Single-threaded sample-and-signal loop for a pet water bowl.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter  Ds3231       FsLogStorage   Esp32TimeAdapter │
//! │  (SensorPort)     (ClockPort)  (LogStorage)   (TimePort)       │
//! │  Ws2812Strip      LogEventSink                                 │
//! │  (PixelStrip)     (EventSink)                                  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            BowlMonitor (pure logic)                    │    │
//! │  │  Cadence · DataLog · Indicator                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The AHT20 and DS3231 share one I²C bus through
//! `embedded_hal_bus::i2c::RefCellDevice`. Every device handle borrows
//! locals of `main`, which never returns once the monitor is running.
#![deny(unused_must_use)]

use core::cell::RefCell;

use anyhow::Result;
use embedded_hal_bus::i2c::RefCellDevice;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::rmt::TxRmtDriver;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::spi::{SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::FromValueType;
use esp_idf_svc::fs::fatfs::Fatfs;
use esp_idf_svc::io::vfs::MountedFatfs;
use esp_idf_svc::sd::spi::SdSpiHostDriver;
use esp_idf_svc::sd::{SdCardConfiguration, SdCardDriver};
use log::{info, warn};

use bowlwatch::adapters::fs_storage::FsLogStorage;
use bowlwatch::adapters::hardware::HardwareAdapter;
use bowlwatch::adapters::log_sink::LogEventSink;
use bowlwatch::adapters::rtc::Ds3231;
use bowlwatch::adapters::time::Esp32TimeAdapter;
use bowlwatch::app::service::{BowlMonitor, MonitorPorts};
use bowlwatch::config::MonitorConfig;
use bowlwatch::drivers::hw_init;
use bowlwatch::drivers::pixel_strip::Ws2812Strip;
use bowlwatch::pins;
use bowlwatch::sensors::SensorHub;
use bowlwatch::sensors::environment::Aht20;
use bowlwatch::sensors::motion::MotionSensor;
use bowlwatch::sensors::pressure::PressureSensor;

// The typed pins bound below must stay in step with `pins`.
const _: () = {
    assert!(pins::I2C_SDA_GPIO == 8);
    assert!(pins::I2C_SCL_GPIO == 9);
    assert!(pins::SD_CS_GPIO == 10);
    assert!(pins::SD_MOSI_GPIO == 11);
    assert!(pins::SD_SCK_GPIO == 12);
    assert!(pins::SD_MISO_GPIO == 13);
    assert!(pins::STRIP_DATA_GPIO == 38);
};

/// Maximum files the FAT VFS keeps open at once.
const FATFS_MAX_OPEN: usize = 4;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Bowlwatch v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Raw peripherals (FSR ADC, PIR input) ───────────────
    if let Err(e) = hw_init::init_peripherals() {
        log::error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;

    // ── 3. Shared I²C bus: AHT20 + DS3231 ─────────────────────
    let i2c_config = I2cConfig::new().baudrate(pins::I2C_FREQ_HZ.Hz().into());
    let i2c = RefCell::new(I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8,
        peripherals.pins.gpio9,
        &i2c_config,
    )?);

    let mut rtc = Ds3231::new(RefCellDevice::new(&i2c));
    if let Err(e) = rtc.init() {
        warn!("RTC init failed: {}", e);
    }

    let sensor_hub = SensorHub::new(
        Aht20::new(RefCellDevice::new(&i2c), FreeRtos),
        PressureSensor::new(pins::FSR_ADC1_CHANNEL),
        MotionSensor::new(pins::PIR_GPIO),
    );

    // ── 4. SD card (SPI) mounted as FAT ───────────────────────
    // A card that fails to mount leaves the mount point absent, so the
    // storage adapter reports not-ready and the monitor runs without a log.
    let _mounted = match mount_sd_card(
        peripherals.spi2,
        peripherals.pins.gpio12,
        peripherals.pins.gpio11,
        peripherals.pins.gpio13,
        peripherals.pins.gpio10,
    ) {
        Ok(m) => Some(m),
        Err(e) => {
            warn!("SD mount failed: {}", e);
            None
        }
    };

    // ── 5. Pixel strip on RMT channel 0 ───────────────────────
    let tx = TxRmtDriver::new(
        peripherals.rmt.channel0,
        peripherals.pins.gpio38,
        &TransmitConfig::new().clock_divider(1),
    )?;
    let strip = Ws2812Strip::new(tx)?;

    // ── 6. Monitor ────────────────────────────────────────────
    let ports = MonitorPorts {
        sensors: HardwareAdapter::new(sensor_hub),
        time: Esp32TimeAdapter::new(),
        clock: rtc,
        storage: FsLogStorage::new(pins::SD_MOUNT_POINT),
        strip,
        delay: FreeRtos,
        sink: LogEventSink::new(),
    };

    info!("System ready. Entering monitor loop.");
    BowlMonitor::start(MonitorConfig::default(), ports)?.run()
}

fn mount_sd_card(
    spi: esp_idf_hal::spi::SPI2,
    sclk: esp_idf_hal::gpio::Gpio12,
    mosi: esp_idf_hal::gpio::Gpio11,
    miso: esp_idf_hal::gpio::Gpio13,
    cs: esp_idf_hal::gpio::Gpio10,
) -> Result<impl Sized> {
    let spi_driver = SpiDriver::new(spi, sclk, mosi, Some(miso), &SpiDriverConfig::new())?;
    let host = SdSpiHostDriver::new(
        spi_driver,
        Some(cs),
        AnyIOPin::none(),
        AnyIOPin::none(),
        AnyIOPin::none(),
        None,
    )?;
    let card = SdCardDriver::new_spi(host, &SdCardConfiguration::new())?;
    let mounted = MountedFatfs::mount(Fatfs::new_sdcard(0, card)?, pins::SD_MOUNT_POINT, FATFS_MAX_OPEN)?;
    info!("SD card mounted at {}", pins::SD_MOUNT_POINT);
    Ok(mounted)
}

//! GPIO / peripheral pin assignments for the bowl monitor board
//! (ESP32-S3 DevKitC-1).
//!
//! Single source of truth. The raw-IDF drivers take these numbers directly;
//! `main` binds the typed esp-idf-hal pins and asserts at compile time
//! that they match.

// ---------------------------------------------------------------------------
// Bowl sensors
// ---------------------------------------------------------------------------

/// Force-sensing resistor under the bowl, voltage divider to ADC1.
/// ADC1 channel 3 is GPIO 4 on the ESP32-S3.
pub const FSR_ADC1_CHANNEL: u32 = 3;

/// HC-SR501 PIR motion sensor output. HIGH = motion.
pub const PIR_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// I²C bus (AHT20 @ 0x38, DS3231 @ 0x68)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;
/// Bus speed (Hz).
pub const I2C_FREQ_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// SD card (SPI2)
// ---------------------------------------------------------------------------

pub const SD_CS_GPIO: i32 = 10;
pub const SD_MOSI_GPIO: i32 = 11;
pub const SD_SCK_GPIO: i32 = 12;
pub const SD_MISO_GPIO: i32 = 13;
/// VFS mount point for the FAT volume.
pub const SD_MOUNT_POINT: &str = "/sdcard";

// ---------------------------------------------------------------------------
// Light strip (WS2812B, driven by RMT channel 0)
// ---------------------------------------------------------------------------

pub const STRIP_DATA_GPIO: i32 = 38;

//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements  | Connects to                      |
//! |--------------|-------------|----------------------------------|
//! | `hardware`   | SensorPort  | AHT20 (I²C), FSR (ADC), PIR (GPIO)|
//! | `rtc`        | ClockPort   | DS3231 (I²C)                     |
//! | `fs_storage` | LogStorage  | FAT volume on the SD card        |
//! | `log_sink`   | EventSink   | Serial log output                |
//! | `time`       | TimePort    | ESP32 system timer               |
//!
//! The pixel strip driver lives in [`crate::drivers::pixel_strip`] and
//! implements `PixelStrip` directly.

pub mod fs_storage;
pub mod hardware;
pub mod log_sink;
pub mod rtc;
pub mod time;

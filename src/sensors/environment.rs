//! AHT20 temperature / relative-humidity sensor (I²C, address 0x38).
//!
//! Each call to [`Aht20::measure`] triggers a fresh conversion, waits for
//! it, and validates the 7-byte frame:
//!
//! ```text
//!  byte 0      1        2        3             4        5        6
//!  status │ H[19:12] │ H[11:4] │ H[3:0] T[19:16] │ T[15:8] │ T[7:0] │ CRC-8
//! ```
//!
//! A frame with the busy bit still set, a CRC mismatch, or any bus error
//! is a failed measurement. The driver never substitutes a previous value.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::error::SensorError;

/// Fixed 7-bit I²C address.
pub const AHT20_ADDR: u8 = 0x38;

const CMD_INIT: [u8; 3] = [0xBE, 0x08, 0x00];
const CMD_TRIGGER: [u8; 3] = [0xAC, 0x33, 0x00];
const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x08;

/// Power-up settle time before the first command (ms).
const POWER_UP_MS: u32 = 40;
/// Calibration command settle time (ms).
const INIT_MS: u32 = 10;
/// Conversion time (ms).
const MEASURE_MS: u32 = 80;

const FULL_SCALE: f32 = 1_048_576.0; // 2^20

/// One validated conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct Aht20<I, D> {
    i2c: I,
    delay: D,
}

impl<I: I2c, D: DelayNs> Aht20<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Load the factory calibration if the sensor does not report it.
    ///
    /// A failure here is logged by the caller; measurements are still
    /// attempted afterwards and fail individually if the sensor is absent.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.delay.delay_ms(POWER_UP_MS);
        if self.status()? & STATUS_CALIBRATED == 0 {
            self.i2c
                .write(AHT20_ADDR, &CMD_INIT)
                .map_err(|_| SensorError::Bus)?;
            self.delay.delay_ms(INIT_MS);
            if self.status()? & STATUS_CALIBRATED == 0 {
                return Err(SensorError::NotCalibrated);
            }
        }
        info!("AHT20: calibrated");
        Ok(())
    }

    /// Trigger one conversion and decode it.
    pub fn measure(&mut self) -> Result<Measurement, SensorError> {
        self.i2c
            .write(AHT20_ADDR, &CMD_TRIGGER)
            .map_err(|_| SensorError::Bus)?;
        self.delay.delay_ms(MEASURE_MS);

        let mut frame = [0u8; 7];
        self.i2c
            .read(AHT20_ADDR, &mut frame)
            .map_err(|_| SensorError::Bus)?;

        decode(&frame).inspect_err(|e| warn!("AHT20: {}", e))
    }

    fn status(&mut self) -> Result<u8, SensorError> {
        let mut status = [0u8; 1];
        self.i2c
            .read(AHT20_ADDR, &mut status)
            .map_err(|_| SensorError::Bus)?;
        Ok(status[0])
    }
}

/// Validate and convert a raw measurement frame.
pub fn decode(frame: &[u8; 7]) -> Result<Measurement, SensorError> {
    if frame[0] & STATUS_BUSY != 0 {
        return Err(SensorError::Busy);
    }
    if crc8(&frame[..6]) != frame[6] {
        return Err(SensorError::Crc);
    }

    let raw_h = (u32::from(frame[1]) << 12) | (u32::from(frame[2]) << 4) | (u32::from(frame[3]) >> 4);
    let raw_t = ((u32::from(frame[3]) & 0x0F) << 16) | (u32::from(frame[4]) << 8) | u32::from(frame[5]);

    Ok(Measurement {
        humidity_pct: raw_h as f32 / FULL_SCALE * 100.0,
        temperature_c: raw_t as f32 / FULL_SCALE * 200.0 - 50.0,
    })
}

/// CRC-8, polynomial 0x31, init 0xFF.
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0xFF_u8, |mut crc, &byte| {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ 0x31 } else { crc << 1 };
        }
        crc
    })
}

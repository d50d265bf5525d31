//! DS3231 real-time clock adapter (I²C, address 0x68).
//!
//! Implements [`ClockPort`]. The clock is probed exactly once by
//! [`Ds3231::init`]; if it does not answer, the adapter stays not-ready
//! for the life of the process and every read reports
//! [`ClockError::NotReady`].
//!
//! Time registers are BCD. The century bit is ignored, so the usable
//! range is 2000–2099.

use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::ClockPort;
use crate::error::ClockError;
use crate::sample::DateTime;

pub const DS3231_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;
/// Oscillator-stop flag: the time was lost on power-down.
const STATUS_OSF: u8 = 0x80;
const HOUR_12H: u8 = 0x40;
const HOUR_PM: u8 = 0x20;

pub struct Ds3231<I> {
    i2c: I,
    ready: bool,
}

impl<I: I2c> Ds3231<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c, ready: false }
    }

    /// Probe the device. Called once at startup; never retried.
    pub fn init(&mut self) -> Result<(), ClockError> {
        let mut status = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_STATUS], &mut status)
            .map_err(|_| ClockError::Bus)?;
        if status[0] & STATUS_OSF != 0 {
            warn!("DS3231: oscillator stopped since last set, time is unreliable");
        }
        self.ready = true;
        info!("DS3231: ready");
        Ok(())
    }
}

impl<I: I2c> ClockPort for Ds3231<I> {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn now(&mut self) -> Result<DateTime, ClockError> {
        if !self.ready {
            return Err(ClockError::NotReady);
        }
        let mut regs = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_SECONDS], &mut regs)
            .map_err(|_| ClockError::Bus)?;
        decode(&regs)
    }
}

fn bcd(byte: u8) -> u8 {
    (byte >> 4) * 10 + (byte & 0x0F)
}

fn decode_hour(reg: u8) -> u8 {
    if reg & HOUR_12H == 0 {
        return bcd(reg & 0x3F);
    }
    let hour12 = bcd(reg & 0x1F) % 12;
    if reg & HOUR_PM != 0 { hour12 + 12 } else { hour12 }
}

/// Decode registers 0x00–0x06 into a calendar time.
pub fn decode(regs: &[u8; 7]) -> Result<DateTime, ClockError> {
    let t = DateTime {
        second: bcd(regs[0] & 0x7F),
        minute: bcd(regs[1] & 0x7F),
        hour: decode_hour(regs[2]),
        // regs[3] is the day of week, not needed
        day: bcd(regs[4] & 0x3F),
        month: bcd(regs[5] & 0x1F),
        year: 2000 + u16::from(bcd(regs[6])),
    };
    if t.is_valid() { Ok(t) } else { Err(ClockError::InvalidTime) }
}

//! Calendar time and the per-tick sample record.
//!
//! A [`Sample`] is built once per logging tick, rendered to a single
//! comma-delimited line, handed to the data log and dropped. Nothing keeps
//! a history of samples in memory.

use core::fmt::{self, Write};

use heapless::String;

/// Column header written once at the top of every log file.
pub const CSV_HEADER: &str = "millis,stamp,datetime,temp_(C),humidity%,fsr_reading";

/// Field text used for an environmental reading that failed.
pub const INVALID_READING: &str = "nan";

/// Capacity of one rendered record line (without the line terminator).
///
/// Sized for the widest possible record: two `f32::MAX` readings at two
/// decimals (43 characters each) plus every integer field at full width.
pub const LINE_CAPACITY: usize = 160;

/// One rendered record.
pub type Line = String<LINE_CAPACITY>;

const SECS_PER_DAY: u32 = 86_400;
/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar.
const DAYS_TO_UNIX_EPOCH: u32 = 719_468;
const DAYS_PER_ERA: u32 = 146_097;

/// Broken-down calendar time as read from the RTC (UTC, no time zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Default for DateTime {
    /// 2000/1/1 0:0:0, the value recorded when no clock is available.
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl DateTime {
    /// Whether every field is inside its calendar range.
    pub fn is_valid(&self) -> bool {
        (1970..=2105).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Seconds since 1970-01-01T00:00:00.
    pub fn unix_seconds(&self) -> u32 {
        // Shift the year so it starts in March; leap day becomes the last day.
        let (y, m) = if self.month <= 2 {
            (u32::from(self.year) - 1, u32::from(self.month) + 9)
        } else {
            (u32::from(self.year), u32::from(self.month) - 3)
        };
        let era = y / 400;
        let yoe = y - era * 400;
        let doy = (153 * m + 2) / 5 + u32::from(self.day) - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        let days = era * DAYS_PER_ERA + doe - DAYS_TO_UNIX_EPOCH;

        days * SECS_PER_DAY
            + u32::from(self.hour) * 3_600
            + u32::from(self.minute) * 60
            + u32::from(self.second)
    }
}

/// `YYYY/M/D H:M:S`, no zero padding.
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} {}:{}:{}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// One logging tick's worth of readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Monotonic milliseconds at the start of the tick.
    pub monotonic_ms: u32,
    pub unix_seconds: u32,
    pub calendar: DateTime,
    /// `None` when the environmental sensor failed this tick.
    pub temperature_c: Option<f32>,
    /// `None` when the environmental sensor failed this tick.
    pub humidity_pct: Option<f32>,
    pub pressure_raw: u16,
}

impl Sample {
    /// Render the record in the fixed column order of [`CSV_HEADER`].
    pub fn to_line(&self) -> Result<Line, fmt::Error> {
        let mut line = Line::new();
        write!(
            line,
            "{},{},{},",
            self.monotonic_ms, self.unix_seconds, self.calendar
        )?;
        write_reading(&mut line, self.temperature_c)?;
        line.push(',').map_err(|_| fmt::Error)?;
        write_reading(&mut line, self.humidity_pct)?;
        write!(line, ",{}", self.pressure_raw)?;
        Ok(line)
    }
}

fn write_reading(line: &mut Line, value: Option<f32>) -> fmt::Result {
    match value {
        Some(v) if v.is_finite() => write!(line, "{v:.2}"),
        _ => line.push_str(INVALID_READING).map_err(|_| fmt::Error),
    }
}

//! Unified error types for the BowlWatch firmware.
//!
//! A single `Error` enum that every subsystem converts into. The monitor
//! loop never propagates these: each failure is absorbed where it occurs
//! and turned into a sentinel value, a no-op, or a diagnostics event.
//! All variants are `Copy` so they travel through events without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A resource could not be brought up at startup.
    Init(InitFailure),
    /// The log storage device rejected an operation.
    Storage(StorageError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Initialisation failures
// ---------------------------------------------------------------------------

/// Startup failures. Each is reported once and never retried; the loop
/// keeps running with the affected resource degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitFailure {
    /// The storage medium is missing or could not be mounted.
    StorageUnavailable,
    /// The real-time clock did not answer at startup.
    ClockUnavailable,
    /// Every candidate log name already exists; nothing will be persisted.
    LogNamesExhausted,
}

impl fmt::Display for InitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageUnavailable => write!(f, "storage unavailable"),
            Self::ClockUnavailable => write!(f, "RTC unavailable"),
            Self::LogNamesExhausted => write!(f, "all log file names in use"),
        }
    }
}

impl From<InitFailure> for Error {
    fn from(e: InitFailure) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The medium is not mounted / not ready.
    Unavailable,
    /// No file is open for appending.
    NotOpen,
    /// The underlying write or flush failed.
    Io,
    /// The record did not fit the fixed-size line buffer.
    LineTooLong,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "medium unavailable"),
            Self::NotOpen => write!(f, "no open log file"),
            Self::Io => write!(f, "I/O error"),
            Self::LineTooLong => write!(f, "record exceeds line buffer"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The I²C transaction failed.
    Bus,
    /// The sensor reported it was still measuring.
    Busy,
    /// The CRC over the measurement frame did not match.
    Crc,
    /// The sensor never reported itself calibrated.
    NotCalibrated,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C transfer failed"),
            Self::Busy => write!(f, "measurement not ready"),
            Self::Crc => write!(f, "CRC mismatch"),
            Self::NotCalibrated => write!(f, "sensor not calibrated"),
        }
    }
}

// ---------------------------------------------------------------------------
// Clock errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The RTC failed to initialise and is not consulted.
    NotReady,
    /// The I²C transaction failed.
    Bus,
    /// The registers held a value outside the calendar range.
    InvalidTime,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "RTC not ready"),
            Self::Bus => write!(f, "I2C transfer failed"),
            Self::InvalidTime => write!(f, "invalid calendar registers"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Port traits: the hexagonal boundary between the monitor loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BowlMonitor (domain)
//! ```
//!
//! Driven adapters (sensors, clocks, storage, light strip, diagnostics)
//! implement these traits. [`BowlMonitor`](super::service::BowlMonitor)
//! owns one of each, injected at construction, so the loop never touches
//! hardware or globals directly. Blocking waits go through
//! [`embedded_hal::delay::DelayNs`] rather than a port of our own.

use crate::config::Rgb;
use crate::error::{ClockError, StorageError};
use crate::sample::DateTime;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the four bowl inputs.
///
/// Environmental reads return `None` when the measurement failed; the
/// caller records that as the invalid sentinel and never substitutes a
/// value. Pressure and motion are raw reads that are always defined.
pub trait SensorPort {
    /// Air temperature in °C.
    fn read_temperature(&mut self) -> Option<f32>;

    /// Relative humidity in %.
    fn read_humidity(&mut self) -> Option<f32>;

    /// Raw force-sensing-resistor ADC count under the bowl.
    fn read_pressure(&mut self) -> u16;

    /// `true` while the PIR sensor reports motion.
    fn read_motion(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Time ports
// ───────────────────────────────────────────────────────────────

/// Free-running monotonic millisecond counter (wraps at `u32::MAX`).
pub trait TimePort {
    fn millis(&self) -> u32;
}

/// Wall-clock calendar source (the battery-backed RTC).
pub trait ClockPort {
    /// Whether the clock came up at startup. Checked once; never retried.
    fn is_ready(&self) -> bool;

    /// Current calendar time.
    fn now(&mut self) -> Result<DateTime, ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Log storage port (driven adapter: domain → SD card)
// ───────────────────────────────────────────────────────────────

/// Append-only text storage for the data log.
///
/// At most one file is open at a time. Appends are buffered; only
/// [`flush`](Self::flush) is allowed to touch the medium.
pub trait LogStorage {
    /// Whether the medium is mounted and usable.
    fn is_ready(&self) -> bool;

    /// Whether a file with this name already exists.
    fn exists(&self, name: &str) -> bool;

    /// Open `name` for appending, creating it if needed. Becomes the
    /// target of every following [`append_line`](Self::append_line).
    fn open_append(&mut self, name: &str) -> Result<(), StorageError>;

    /// Buffer `line` plus a line terminator.
    fn append_line(&mut self, line: &str) -> Result<(), StorageError>;

    /// Push buffered data to durable storage. May be slow.
    fn flush(&mut self) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Light strip port (driven adapter: domain → LEDs)
// ───────────────────────────────────────────────────────────────

/// Addressable light strip. Colour changes are staged in a buffer and
/// only become visible on [`show`](Self::show).
pub trait PixelStrip {
    /// Stage `colour` on every pixel.
    fn fill(&mut self, colour: Rgb);

    /// Stage all pixels off.
    fn clear(&mut self);

    /// Push the staged buffer to the hardware.
    fn show(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostics)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go; the firmware sends
/// them to the serial console.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

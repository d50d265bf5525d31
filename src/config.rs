//! Timing and threshold parameters for the bowl monitor.
//!
//! Every tunable is a named compile-time constant. [`MonitorConfig`]
//! gathers them into one value that is injected into the loop, so host
//! tests can run with shortened periods while the firmware always uses
//! [`MonitorConfig::default()`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

// --- Cadence ---

/// Interval between logging ticks (milliseconds). 10 minutes.
pub const LOG_INTERVAL_MS: u32 = 10 * 60 * 1000;
/// Minimum interval between forced flushes to the medium (milliseconds).
pub const FLUSH_INTERVAL_MS: u32 = 10 * 60 * 1000;
/// Pause after each logging tick before polling resumes (milliseconds).
pub const POST_TICK_COOLDOWN_MS: u32 = 1_000;

// --- Fill level ---

/// Raw FSR reading at or below which the bowl needs refilling.
pub const FILL_THRESHOLD_RAW: u16 = 940;

// --- Indicator ---

/// How long the presence light stays on (milliseconds).
pub const PRESENCE_HOLD_MS: u32 = 10_000;
/// On-time and off-time of one refill-alert blink (milliseconds).
pub const ALERT_HALF_PERIOD_MS: u32 = 500;
/// Refill warning colour.
pub const ALERT_COLOUR: Rgb = (255, 0, 0);
/// Presence colour.
pub const PRESENCE_COLOUR: Rgb = (255, 255, 255);
/// Number of pixels on the strip.
pub const PIXEL_COUNT: usize = 8;

/// Monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Cadence ---
    /// Logging period (milliseconds)
    pub log_interval_ms: u32,
    /// Flush period (milliseconds)
    pub flush_interval_ms: u32,
    /// Fixed delay after a logging tick (milliseconds)
    pub post_tick_cooldown_ms: u32,

    // --- Fill level ---
    /// Raw pressure at or below which the refill alert fires
    pub fill_threshold_raw: u16,

    // --- Indicator ---
    /// Presence light hold time (milliseconds)
    pub presence_hold_ms: u32,
    /// Alert blink half-period (milliseconds)
    pub alert_half_period_ms: u32,
    pub alert_colour: Rgb,
    pub presence_colour: Rgb,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_interval_ms: LOG_INTERVAL_MS,
            flush_interval_ms: FLUSH_INTERVAL_MS,
            post_tick_cooldown_ms: POST_TICK_COOLDOWN_MS,

            fill_threshold_raw: FILL_THRESHOLD_RAW,

            presence_hold_ms: PRESENCE_HOLD_MS,
            alert_half_period_ms: ALERT_HALF_PERIOD_MS,
            alert_colour: ALERT_COLOUR,
            presence_colour: PRESENCE_COLOUR,
        }
    }
}

impl MonitorConfig {
    /// Reject values that would make the loop spin or log continuously.
    pub fn validate(&self) -> Result<()> {
        if self.log_interval_ms == 0 {
            return Err(Error::Config("log_interval_ms must be non-zero"));
        }
        if self.flush_interval_ms == 0 {
            return Err(Error::Config("flush_interval_ms must be non-zero"));
        }
        if self.presence_hold_ms == 0 {
            return Err(Error::Config("presence_hold_ms must be non-zero"));
        }
        if self.alert_half_period_ms == 0 {
            return Err(Error::Config("alert_half_period_ms must be non-zero"));
        }
        // Half the u32 millis range: beyond this a wrapped counter is ambiguous.
        if self.log_interval_ms > u32::MAX / 2 || self.flush_interval_ms > u32::MAX / 2 {
            return Err(Error::Config("period exceeds half the millis range"));
        }
        Ok(())
    }
}

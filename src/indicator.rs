//! Status light effects.
//!
//! Two fixed, blocking sequences drive the pixel strip:
//!
//! | Effect        | Sequence                                          | Duration |
//! |---------------|---------------------------------------------------|----------|
//! | `RefillAlert` | warning colour, hold ½ period, off, hold ½ period | ~1 s     |
//! | `Presence`    | neutral colour, hold, off                         | ~10 s    |
//!
//! An effect always runs to completion; nothing is polled while it holds.
//! The refill alert has no timer of its own: the loop calls it once per
//! iteration while the bowl is low, and that repetition is the blink.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::PixelStrip;
use crate::config::{MonitorConfig, Rgb};

/// Which effect the reactive check selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Bowl pressure at or below the fill threshold.
    RefillAlert,
    /// Motion near a sufficiently full bowl.
    Presence,
}

impl Effect {
    /// Apply the priority rule: a low bowl wins over motion.
    ///
    /// `motion` is only evaluated when the fill check does not select the
    /// alert, matching the order in which the sensors are read.
    pub fn select(
        pressure_raw: u16,
        fill_threshold_raw: u16,
        motion: impl FnOnce() -> bool,
    ) -> Option<Self> {
        if pressure_raw <= fill_threshold_raw {
            Some(Self::RefillAlert)
        } else if motion() {
            Some(Self::Presence)
        } else {
            None
        }
    }
}

/// Owns the strip and plays effects on it.
pub struct Indicator<P: PixelStrip> {
    strip: P,
    alert_colour: Rgb,
    presence_colour: Rgb,
    alert_half_period_ms: u32,
    presence_hold_ms: u32,
}

impl<P: PixelStrip> Indicator<P> {
    pub fn new(strip: P, config: &MonitorConfig) -> Self {
        Self {
            strip,
            alert_colour: config.alert_colour,
            presence_colour: config.presence_colour,
            alert_half_period_ms: config.alert_half_period_ms,
            presence_hold_ms: config.presence_hold_ms,
        }
    }

    /// Blank the strip.
    pub fn off(&mut self) {
        self.strip.clear();
        self.strip.show();
    }

    /// Play `effect` to completion.
    pub fn play(&mut self, effect: Effect, delay: &mut impl DelayNs) {
        match effect {
            Effect::RefillAlert => self.alert(delay),
            Effect::Presence => self.presence(delay),
        }
    }

    /// One blink of the refill warning: on for half a period, off for half.
    pub fn alert(&mut self, delay: &mut impl DelayNs) {
        debug!("Indicator: refill alert");
        self.strip.fill(self.alert_colour);
        self.strip.show();
        delay.delay_ms(self.alert_half_period_ms);
        self.off();
        delay.delay_ms(self.alert_half_period_ms);
    }

    /// Solid presence light for the full hold time, then off.
    pub fn presence(&mut self, delay: &mut impl DelayNs) {
        debug!("Indicator: presence for {}ms", self.presence_hold_ms);
        self.strip.fill(self.presence_colour);
        self.strip.show();
        delay.delay_ms(self.presence_hold_ms);
        self.off();
    }

    pub fn strip(&self) -> &P {
        &self.strip
    }
}

//! WS2812 addressable LED strip driver.
//!
//! Implements [`PixelStrip`] for a strip of [`PIXEL_COUNT`] pixels. Colours
//! are staged in a frame buffer by `fill`/`clear` and only reach the LEDs on
//! `show`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: each `show` encodes the frame as an RMT pulse train (GRB
//! byte order, MSB first) and transmits it blocking on one RMT channel.
//! On host/test: keeps the last shown frame in memory.

use crate::app::ports::PixelStrip;
use crate::config::{PIXEL_COUNT, Rgb};

#[cfg(target_os = "espidf")]
use esp_idf_hal::rmt::{PinState, Pulse, TxRmtDriver, VariableLengthSignal};
#[cfg(target_os = "espidf")]
use esp_idf_hal::sys::EspError;

pub type Frame = [Rgb; PIXEL_COUNT];

const BLANK: Frame = [(0, 0, 0); PIXEL_COUNT];

// ── Bit timing (ns) ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
const T0H_NS: u64 = 350;
#[cfg(target_os = "espidf")]
const T0L_NS: u64 = 800;
#[cfg(target_os = "espidf")]
const T1H_NS: u64 = 700;
#[cfg(target_os = "espidf")]
const T1L_NS: u64 = 600;

#[cfg(target_os = "espidf")]
struct BitPulses {
    zero: [Pulse; 2],
    one: [Pulse; 2],
}

pub struct Ws2812Strip {
    staged: Frame,
    shown: Frame,
    frames: u32,
    #[cfg(target_os = "espidf")]
    tx: TxRmtDriver<'static>,
    #[cfg(target_os = "espidf")]
    bits: BitPulses,
}

#[cfg(target_os = "espidf")]
impl Ws2812Strip {
    /// Wrap an RMT transmitter already bound to the strip's data pin.
    pub fn new(tx: TxRmtDriver<'static>) -> Result<Self, EspError> {
        use core::time::Duration;

        let hz = tx.counter_clock()?;
        let pulse = |state, ns| Pulse::new_with_duration(hz, state, &Duration::from_nanos(ns));
        let bits = BitPulses {
            zero: [pulse(PinState::High, T0H_NS)?, pulse(PinState::Low, T0L_NS)?],
            one: [pulse(PinState::High, T1H_NS)?, pulse(PinState::Low, T1L_NS)?],
        };
        Ok(Self {
            staged: BLANK,
            shown: BLANK,
            frames: 0,
            tx,
            bits,
        })
    }

    fn transmit(&mut self) -> Result<(), EspError> {
        let mut signal = VariableLengthSignal::with_capacity(PIXEL_COUNT * 24 * 2);
        for &(r, g, b) in &self.staged {
            for byte in [g, r, b] {
                for bit in (0..8).rev() {
                    let pulses = if byte & (1 << bit) != 0 { &self.bits.one } else { &self.bits.zero };
                    signal.push(pulses)?;
                }
            }
        }
        self.tx.start_blocking(&signal)
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for Ws2812Strip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl Ws2812Strip {
    pub fn new() -> Self {
        Self {
            staged: BLANK,
            shown: BLANK,
            frames: 0,
        }
    }

    fn transmit(&mut self) -> Result<(), core::convert::Infallible> {
        Ok(())
    }
}

impl Ws2812Strip {
    /// The frame most recently pushed to the LEDs.
    pub fn shown(&self) -> &Frame {
        &self.shown
    }

    /// Number of frames pushed since construction.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn is_lit(&self) -> bool {
        self.shown.iter().any(|&px| px != (0, 0, 0))
    }
}

impl PixelStrip for Ws2812Strip {
    fn fill(&mut self, colour: Rgb) {
        self.staged = [colour; PIXEL_COUNT];
    }

    fn clear(&mut self) {
        self.staged = BLANK;
    }

    fn show(&mut self) {
        if let Err(e) = self.transmit() {
            log::warn!("Ws2812Strip: transmit failed: {:?}", e);
            return;
        }
        self.shown = self.staged;
        self.frames = self.frames.wrapping_add(1);
    }
}

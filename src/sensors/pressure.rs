//! Force-sensing resistor under the bowl.
//!
//! The FSR forms a voltage divider read by an ESP32-S3 ADC channel. The
//! raw count is used as-is: a heavier (fuller) bowl reads higher. No
//! calibration or smoothing is applied; the fill threshold is expressed
//! in the same raw units.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Mid-scale: a half-full bowl on the simulated board.
#[cfg(not(target_os = "espidf"))]
static SIM_FSR_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fsr_adc(raw: u16) {
    SIM_FSR_ADC.store(raw, Ordering::Relaxed);
}

/// 12-bit ADC full scale.
pub const ADC_MAX: u16 = 4095;

pub struct PressureSensor {
    _adc_channel: u32,
}

impl PressureSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            _adc_channel: adc_channel,
        }
    }

    /// Raw ADC count, clamped to 12 bits.
    pub fn read(&self) -> u16 {
        self.read_adc().min(ADC_MAX)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self._adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_FSR_ADC.load(Ordering::Relaxed)
    }
}

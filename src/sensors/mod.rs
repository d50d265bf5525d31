//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver. Unlike a snapshot-style hub, each
//! input is read on its own, because the monitor loop reads them at
//! different moments: pressure every iteration, motion only when the bowl
//! is full enough, and the environment only on logging ticks.

pub mod environment;
pub mod motion;
pub mod pressure;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;

use environment::Aht20;
use motion::MotionSensor;
use pressure::PressureSensor;

/// Aggregates all sensor drivers.
pub struct SensorHub<I, D> {
    pub environment: Aht20<I, D>,
    pub pressure: PressureSensor,
    pub motion: MotionSensor,
}

impl<I: I2c, D: DelayNs> SensorHub<I, D> {
    /// Construct the hub from pre-built drivers and bring up the AHT20.
    ///
    /// An environmental sensor that fails to initialise is logged and kept:
    /// its reads will report the failure sentinel.
    pub fn new(environment: Aht20<I, D>, pressure: PressureSensor, motion: MotionSensor) -> Self {
        let mut hub = Self {
            environment,
            pressure,
            motion,
        };
        if let Err(e) = hub.environment.init() {
            warn!("SensorHub: AHT20 init failed ({}), readings will be nan", e);
        }
        hub
    }

    /// Temperature from a fresh conversion, `None` on failure.
    pub fn temperature_c(&mut self) -> Option<f32> {
        self.environment.measure().ok().map(|m| m.temperature_c)
    }

    /// Relative humidity from a fresh conversion, `None` on failure.
    pub fn humidity_pct(&mut self) -> Option<f32> {
        self.environment.measure().ok().map(|m| m.humidity_pct)
    }
}

//! Hardware adapter: bridges the real sensors to the domain port.
//!
//! Owns the [`SensorHub`] and exposes it through [`SensorPort`]. On
//! non-espidf targets the pressure and motion drivers read simulation
//! atomics and the AHT20 talks to whatever `I2c` implementation is given.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::SensorPort;
use crate::sensors::SensorHub;

/// Concrete adapter over every bowl sensor.
pub struct HardwareAdapter<I, D> {
    sensor_hub: SensorHub<I, D>,
}

impl<I: I2c, D: DelayNs> HardwareAdapter<I, D> {
    pub fn new(sensor_hub: SensorHub<I, D>) -> Self {
        Self { sensor_hub }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I: I2c, D: DelayNs> SensorPort for HardwareAdapter<I, D> {
    fn read_temperature(&mut self) -> Option<f32> {
        self.sensor_hub.temperature_c()
    }

    fn read_humidity(&mut self) -> Option<f32> {
        self.sensor_hub.humidity_pct()
    }

    fn read_pressure(&mut self) -> u16 {
        self.sensor_hub.pressure.read()
    }

    fn read_motion(&mut self) -> bool {
        self.sensor_hub.motion.read()
    }
}

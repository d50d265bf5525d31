//! HC-SR501 passive-infrared motion sensor.
//!
//! The module drives its output HIGH while motion is detected (its own
//! retrigger/hold timing is set by the on-board potentiometers). The
//! firmware only samples the level; it keeps no state of its own.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the GPIO level via hw_init helpers.
//! On host/test: defaults to no motion.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_PIR: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(active: bool) {
    SIM_PIR.store(active, Ordering::Relaxed);
}

pub struct MotionSensor {
    _gpio: i32,
}

impl MotionSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// `true` while the PIR output is HIGH.
    #[cfg(target_os = "espidf")]
    pub fn read(&self) -> bool {
        hw_init::gpio_read(self._gpio)
    }

    /// `true` while the simulated PIR output is HIGH.
    #[cfg(not(target_os = "espidf"))]
    pub fn read(&self) -> bool {
        SIM_PIR.load(Ordering::Relaxed)
    }
}

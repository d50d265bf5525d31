//! Peripheral bring-up and output drivers.

pub mod hw_init;
pub mod pixel_strip;

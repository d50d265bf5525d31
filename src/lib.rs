//! Bowlwatch firmware library.
//!
//! Exposes the monitor core, its ports and the host-buildable adapters for
//! integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod cadence;
pub mod config;
pub mod datalog;
pub mod drivers;
pub mod error;
pub mod indicator;
pub mod pins;
pub mod sample;
pub mod sensors;

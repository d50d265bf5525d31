//! Application core: pure domain logic, zero direct I/O.
//!
//! The monitor loop lives in [`service`]. All interaction with sensors,
//! clocks, storage and the light strip happens through the **port traits**
//! defined in [`ports`], keeping this layer fully testable on the host.

pub mod events;
pub mod ports;
pub mod service;

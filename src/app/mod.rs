//! Application core: control logic, zero direct I/O.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod ports;
pub mod render;
pub mod service;
pub mod telemetry;

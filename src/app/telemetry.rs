//! Point-in-time status snapshot for the serial console.

use serde::Serialize;

use super::render::RenderMode;

/// A telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub heater_on: bool,
    /// Median of the last full window, `None` while buffering.
    pub median_c: Option<f64>,
    /// Highest median shown on the normal screen so far.
    pub peak_c: Option<f64>,
    pub window_fill: usize,
    pub window_capacity: usize,
    pub sensor_fault: bool,
    pub servo_attached: bool,
    pub last_servo_move_ms: u64,
    pub steps: u64,
    pub screen: RenderMode,
}

impl StatusSnapshot {
    /// Single-line JSON.  Non-finite temperatures serialise as `null`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

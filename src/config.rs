//! System configuration parameters.
//!
//! The control constants are fixed at compile time: the thermostat is a
//! two-point controller whose thresholds are part of the plumbing of the
//! heater, not something to tune in the field.  [`SystemConfig`] only holds
//! the parameters of the surrounding shell (loop cadence, servo calibration,
//! display colour).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// --- Control constants ---

/// Median below which the heater is switched on (°C, strict).
pub const HEATER_ON_BELOW_C: f64 = 130.0;
/// Median above which the heater is switched off (°C, strict).
pub const HEATER_OFF_ABOVE_C: f64 = 150.0;
/// Servo angle that closes the heater valve.
pub const SERVO_HEATER_OFF_POS: u8 = 0;
/// Servo angle that opens the heater valve.
pub const SERVO_HEATER_ON_POS: u8 = 180;
/// Idle time after the last servo move before it is detached.
pub const SERVO_DETACH_DELAY_MS: u64 = 5000;
/// Number of raw samples in the median window. Odd, so the middle is unique.
pub const MEDIAN_WINDOW_SIZE: usize = 7;

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Period between control steps (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Period between telemetry log lines (milliseconds)
    pub telemetry_interval_ms: u32,

    // --- Servo ---
    /// Servo PWM frame rate (Hz)
    pub servo_frequency_hz: u32,
    /// Pulse width at 0 degrees (microseconds)
    pub servo_min_pulse_us: u16,
    /// Pulse width at 180 degrees (microseconds)
    pub servo_max_pulse_us: u16,

    // --- Display ---
    /// Foreground colour passed to the display (1 = white on monochrome panels)
    pub display_color: u16,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            control_loop_interval_ms: 250,  // 4 Hz
            telemetry_interval_ms: 10_000, // every 10 s

            // Servo (standard hobby servo range)
            servo_frequency_hz: 50,
            servo_min_pulse_us: 500,
            servo_max_pulse_us: 2400,

            // Display
            display_color: 1,
        }
    }
}

impl SystemConfig {
    /// Check the shell parameters for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be non-zero"));
        }
        if self.telemetry_interval_ms < self.control_loop_interval_ms {
            return Err(Error::Config(
                "telemetry_interval_ms must not be shorter than the control loop",
            ));
        }
        if self.servo_frequency_hz == 0 {
            return Err(Error::Config("servo_frequency_hz must be non-zero"));
        }
        if self.servo_min_pulse_us >= self.servo_max_pulse_us {
            return Err(Error::Config("servo pulse range is empty or inverted"));
        }
        if u32::from(self.servo_max_pulse_us) >= self.servo_period_us() {
            return Err(Error::Config("servo_max_pulse_us exceeds the PWM period"));
        }
        Ok(())
    }

    /// PWM period derived from the servo frame rate.
    pub fn servo_period_us(&self) -> u32 {
        1_000_000 / self.servo_frequency_hz.max(1)
    }
}

//! Two-point (bang-bang) heater decision with a dead band.
//!
//! The heater switches on when the filtered temperature drops strictly below
//! the lower threshold and off when it rises strictly above the upper one.
//! Anything in between (thresholds included) holds the current state.

use crate::config::{SERVO_HEATER_OFF_POS, SERVO_HEATER_ON_POS};

/// A state transition the caller must carry out on the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterCommand {
    TurnOn,
    TurnOff,
}

impl HeaterCommand {
    /// Servo angle that realises this command.
    pub const fn position(self) -> u8 {
        match self {
            Self::TurnOn => SERVO_HEATER_ON_POS,
            Self::TurnOff => SERVO_HEATER_OFF_POS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hysteresis {
    on_below: f64,
    off_above: f64,
    heater_on: bool,
}

impl Hysteresis {
    /// Heater starts off.
    pub fn new(on_below: f64, off_above: f64) -> Self {
        debug_assert!(on_below <= off_above, "hysteresis band is inverted");
        Self {
            on_below,
            off_above,
            heater_on: false,
        }
    }

    /// Feed one filtered temperature; returns a command when the state flips.
    ///
    /// `NaN` compares false against both thresholds and never transitions.
    pub fn update(&mut self, filtered_c: f64) -> Option<HeaterCommand> {
        if filtered_c < self.on_below && !self.heater_on {
            self.heater_on = true;
            Some(HeaterCommand::TurnOn)
        } else if filtered_c > self.off_above && self.heater_on {
            self.heater_on = false;
            Some(HeaterCommand::TurnOff)
        } else {
            None
        }
    }

    /// Force the state without emitting a command (used at setup).
    pub fn reset(&mut self) {
        self.heater_on = false;
    }

    pub fn is_heater_on(&self) -> bool {
        self.heater_on
    }
}

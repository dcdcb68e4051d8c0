//! Hobby servo driving the heater valve.
//!
//! Position is encoded as a pulse width inside a fixed PWM frame (50 Hz,
//! 500–2400 µs by default).  Detaching stops the pulse train entirely, which
//! lets the servo relax and stops it drawing holding current.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an LEDC channel through `embedded_hal::pwm::SetDutyCycle`.
//! On host/test: any `SetDutyCycle` implementation (the unit tests record
//! duty writes in memory).

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::config::SystemConfig;
use crate::error::{ActuatorError, Error};

/// Highest commandable angle.
pub const MAX_ANGLE: u8 = 180;

/// Pulse-width calibration for one servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCalibration {
    pub min_pulse_us: u16,
    pub max_pulse_us: u16,
    pub period_us: u32,
}

impl TryFrom<&SystemConfig> for ServoCalibration {
    type Error = Error;

    /// Only a validated configuration yields a calibration.
    fn try_from(config: &SystemConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            min_pulse_us: config.servo_min_pulse_us,
            max_pulse_us: config.servo_max_pulse_us,
            period_us: config.servo_period_us(),
        })
    }
}

impl ServoCalibration {
    /// Linear angle → pulse mapping, clamped to the servo's travel.
    pub fn pulse_us(&self, angle: u8) -> u16 {
        let angle = u32::from(angle.min(MAX_ANGLE));
        let span = u32::from(self.max_pulse_us.saturating_sub(self.min_pulse_us));
        self.min_pulse_us
            .saturating_add((span * angle / u32::from(MAX_ANGLE)) as u16)
    }

    /// Duty count for `pulse_us` on a channel whose full scale is `max_duty`.
    pub fn duty(&self, pulse_us: u16, max_duty: u16) -> u16 {
        if self.period_us == 0 {
            return 0;
        }
        let duty = u64::from(pulse_us) * u64::from(max_duty) / u64::from(self.period_us);
        duty.min(u64::from(max_duty)) as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoState {
    Detached { pending: Option<u8> },
    Holding { angle: u8 },
}

pub struct ServoDriver<P> {
    pwm: P,
    cal: ServoCalibration,
    state: ServoState,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    /// Starts detached; the PWM output is forced off.
    pub fn new(mut pwm: P, cal: ServoCalibration) -> Self {
        if pwm.set_duty_cycle_fully_off().is_err() {
            warn!("Servo PWM could not be silenced at init");
        }
        Self {
            pwm,
            cal,
            state: ServoState::Detached { pending: None },
        }
    }

    /// Start the pulse train.  Re-drives a position written while detached.
    pub fn attach(&mut self) -> Result<(), ActuatorError> {
        match self.state {
            ServoState::Holding { .. } => Ok(()),
            ServoState::Detached { pending: None } => {
                self.state = ServoState::Holding { angle: 0 };
                Ok(())
            }
            ServoState::Detached {
                pending: Some(angle),
            } => {
                self.state = ServoState::Holding { angle };
                self.drive(angle)
            }
        }
    }

    pub fn detach(&mut self) -> Result<(), ActuatorError> {
        if let ServoState::Holding { .. } = self.state {
            self.state = ServoState::Detached { pending: None };
            self.pwm
                .set_duty_cycle_fully_off()
                .map_err(|_| ActuatorError::PwmWriteFailed)?;
        }
        Ok(())
    }

    /// Move to `angle`.  While detached the angle is remembered and
    /// [`ActuatorError::Detached`] is returned.
    pub fn write(&mut self, angle: u8) -> Result<(), ActuatorError> {
        let angle = angle.min(MAX_ANGLE);
        match self.state {
            ServoState::Holding { .. } => {
                self.state = ServoState::Holding { angle };
                self.drive(angle)
            }
            ServoState::Detached { .. } => {
                self.state = ServoState::Detached {
                    pending: Some(angle),
                };
                Err(ActuatorError::Detached)
            }
        }
    }

    fn drive(&mut self, angle: u8) -> Result<(), ActuatorError> {
        let duty = self
            .cal
            .duty(self.cal.pulse_us(angle), self.pwm.max_duty_cycle());
        self.pwm
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::PwmWriteFailed)
    }

    pub fn state(&self) -> ServoState {
        self.state
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, ServoState::Holding { .. })
    }

    /// Release the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

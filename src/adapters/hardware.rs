//! Hardware adapters: bridge the peripheral drivers to the port traits.
//!
//! Drivers return typed errors; ports are infallible.  This is where the
//! two meet: a failed thermocouple read becomes a fault reading, a failed
//! PWM write is logged and the control loop carries on.

use embedded_hal::pwm::SetDutyCycle;
use embedded_hal::spi::SpiDevice;
use log::{debug, warn};

use crate::app::ports::{ActuatorPort, TemperatureReading, TemperaturePort};
use crate::drivers::max31855::Max31855;
use crate::drivers::servo::ServoDriver;
use crate::error::ActuatorError;

// ── TemperaturePort implementation ────────────────────────────

impl<SPI: SpiDevice> TemperaturePort for Max31855<SPI> {
    fn read(&mut self) -> TemperatureReading {
        match Max31855::read(self) {
            Ok(frame) => TemperatureReading::ok(frame.thermocouple_c),
            Err(e) => {
                debug!("Thermocouple read failed: {}", e);
                TemperatureReading::faulted(f64::NAN)
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: SetDutyCycle> ActuatorPort for ServoDriver<P> {
    fn write(&mut self, position: u8) {
        match ServoDriver::write(self, position) {
            Ok(()) => {}
            // The core always attaches first; a detached write means the
            // attach itself failed and was already reported.
            Err(ActuatorError::Detached) => {}
            Err(e) => warn!("Servo write({}) failed: {}", position, e),
        }
    }

    fn attach(&mut self) {
        if let Err(e) = ServoDriver::attach(self) {
            warn!("Servo attach failed: {}", e);
        }
    }

    fn detach(&mut self) {
        if let Err(e) = ServoDriver::detach(self) {
            warn!("Servo detach failed: {}", e);
        }
    }

    fn is_attached(&self) -> bool {
        ServoDriver::is_attached(self)
    }
}

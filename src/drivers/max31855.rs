//! MAX31855 cold-junction-compensated thermocouple-to-digital converter.
//!
//! Read-only SPI device: every transaction clocks out one 32-bit frame.
//!
//! ```text
//!  31      18  17  16  15        4  3   2   1   0
//! ┌──────────┬───┬───┬───────────┬───┬───┬───┬───┐
//! │ TC temp  │ - │ F │ CJ temp   │ - │SCV│SCG│OC │
//! └──────────┴───┴───┴───────────┴───┴───┴───┴───┘
//!  14-bit signed, 0.25 °C     12-bit signed, 0.0625 °C
//! ```

use embedded_hal::spi::SpiDevice;

use crate::error::SensorError;

const FAULT_BIT: u32 = 1 << 16;
const SCV_BIT: u32 = 1 << 2;
const SCG_BIT: u32 = 1 << 1;
const OC_BIT: u32 = 1 << 0;

const TC_LSB_C: f64 = 0.25;
const CJ_LSB_C: f64 = 0.0625;

/// A decoded, fault-free frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Max31855Frame {
    /// Hot-junction (probe) temperature.
    pub thermocouple_c: f64,
    /// Cold-junction (die) temperature.
    pub internal_c: f64,
}

impl Max31855Frame {
    /// Decode a raw big-endian frame, surfacing the converter's fault flags.
    pub fn decode(raw: u32) -> Result<Self, SensorError> {
        if raw & FAULT_BIT != 0 {
            return Err(if raw & OC_BIT != 0 {
                SensorError::OpenCircuit
            } else if raw & SCG_BIT != 0 {
                SensorError::ShortToGround
            } else if raw & SCV_BIT != 0 {
                SensorError::ShortToVcc
            } else {
                // Fault bit without a cause bit: treat as a broken frame.
                SensorError::BusFailed
            });
        }

        // Arithmetic shifts on the signed word sign-extend both fields.
        let word = raw as i32;
        let tc_counts = word >> 18;
        let cj_counts = (word << 16) >> 20;

        Ok(Self {
            thermocouple_c: f64::from(tc_counts) * TC_LSB_C,
            internal_c: f64::from(cj_counts) * CJ_LSB_C,
        })
    }
}

pub struct Max31855<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Max31855<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Clock out one frame.
    pub fn read_raw(&mut self) -> Result<u32, SensorError> {
        let mut buf = [0u8; 4];
        self.spi
            .read(&mut buf)
            .map_err(|_| SensorError::BusFailed)?;
        Ok(u32::from_be_bytes(buf))
    }

    pub fn read(&mut self) -> Result<Max31855Frame, SensorError> {
        Max31855Frame::decode(self.read_raw()?)
    }

    /// Release the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

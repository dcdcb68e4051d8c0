//! Water heater thermostat firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  Max31855 (SPI)   ServoDriver (LEDC)   OledDisplay     Clock │
//! │  TemperaturePort  ActuatorPort         DisplayPort           │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            Thermostat (pure control logic)             │  │
//! │  │      Median window · Hysteresis · Servo idle timer     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::spi::config::Config as SpiConfig;
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::FromValueType;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use thermostat::adapters::oled::OledDisplay;
use thermostat::adapters::time::MonotonicClock;
use thermostat::app::ports::Clock;
use thermostat::app::service::Thermostat;
use thermostat::config::SystemConfig;
use thermostat::drivers::max31855::Max31855;
use thermostat::drivers::servo::{ServoCalibration, ServoDriver};
use thermostat::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Water Heater Thermostat v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // MAX31855 on VSPI: SCK 18, MISO 19, CS 5.  MOSI 23 is unused by the
    // converter but the bus driver wants a pin.
    let spi_bus = SpiDriver::new(
        peripherals.spi2,
        pins.gpio18,
        pins.gpio23,
        Some(pins.gpio19),
        &SpiDriverConfig::new(),
    )?;
    let spi = SpiDeviceDriver::new(
        spi_bus,
        Some(pins.gpio5),
        &SpiConfig::new().baudrate(4.MHz().into()),
    )?;
    let mut sensor = Max31855::new(spi);

    // Servo on GPIO 13, 50 Hz frame, 14-bit resolution.
    let ledc_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(config.servo_frequency_hz.Hz().into())
            .resolution(Resolution::Bits14),
    )?;
    let pwm = LedcDriver::new(peripherals.ledc.channel0, &ledc_timer, pins.gpio13)?;
    let mut servo = ServoDriver::new(pwm, ServoCalibration::try_from(&config)?);

    // SSD1306 128×64 OLED on I2C0: SDA 21, SCL 22, address 0x3C.
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio21,
        pins.gpio22,
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let mut panel = Ssd1306::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();
    panel
        .init()
        .map_err(|_| Error::Init("SSD1306 did not respond"))?;
    let mut display = OledDisplay::new(panel);
    let clock = MonotonicClock::new();

    // ── 3. Control loop ───────────────────────────────────────
    let mut thermostat = Thermostat::new(&mut sensor, &mut servo, &mut display, &clock)
        .with_text_color(config.display_color);
    thermostat.setup();

    info!("System ready. Entering control loop.");

    let telemetry_ms = u64::from(config.telemetry_interval_ms);
    let mut last_telemetry = clock.now_millis();

    loop {
        thermostat.step();

        let now = clock.now_millis();
        if now.wrapping_sub(last_telemetry) >= telemetry_ms {
            match thermostat.status().to_json() {
                Ok(json) => info!("STATUS | {}", json),
                Err(e) => warn!("Telemetry encoding failed: {}", e),
            }
            last_telemetry = now;
        }

        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}

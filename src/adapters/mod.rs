//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter           | Implements       | Connects to                  |
//! |-------------------|------------------|------------------------------|
//! | `hardware`        | TemperaturePort  | MAX31855 over SPI            |
//! |                   | ActuatorPort     | Servo over LEDC PWM          |
//! | `oled`            | DisplayPort      | SSD1306 OLED over I2C        |
//! | `time`            | Clock            | ESP32 system timer / Instant |

pub mod hardware;
pub mod oled;
pub mod time;

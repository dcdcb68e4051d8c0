//! Port traits: the hexagonal boundary between control logic and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Thermostat (domain)
//! ```
//!
//! Driven adapters (thermocouple, servo, display, timer) implement these
//! traits.  The [`Thermostat`](super::service::Thermostat) borrows them for
//! its lifetime, so the control core never touches hardware directly.
//!
//! Every port is infallible from the core's point of view.  Adapters absorb
//! their own bus errors: the temperature port reports them as a fault
//! reading, the others log and carry on.

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One thermocouple sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    /// Hot-junction temperature in °C. Unreliable when `fault` is set.
    pub celsius: f64,
    /// The converter flagged this sample as invalid.
    pub fault: bool,
}

impl TemperatureReading {
    pub const fn ok(celsius: f64) -> Self {
        Self {
            celsius,
            fault: false,
        }
    }

    pub const fn faulted(celsius: f64) -> Self {
        Self {
            celsius,
            fault: true,
        }
    }
}

/// Read-side port: the domain calls this once per control step.
pub trait TemperaturePort {
    fn read(&mut self) -> TemperatureReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Binary-position servo with an explicit attach/detach lifecycle.
pub trait ActuatorPort {
    /// Move to `position` (degrees, 0–180).
    fn write(&mut self, position: u8);

    /// Start driving the servo. Idempotent.
    fn attach(&mut self);

    /// Stop driving the servo. Idempotent.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Imperative text surface modelled on small monochrome OLED libraries.
///
/// Nothing is visible until [`flush`](Self::flush).
pub trait DisplayPort {
    /// Blank the frame buffer.
    fn clear(&mut self);

    /// Push the frame buffer to the panel.
    fn flush(&mut self);

    /// Glyph scale factor (1 = 6×8 px cells).
    fn set_text_scale(&mut self, scale: u8);

    fn set_color(&mut self, color: u16);

    /// Move the text cursor to pixel `(x, y)`.
    fn set_cursor(&mut self, x: i32, y: i32);

    fn print_text(&mut self, text: &str);

    /// Print `value` with a fixed number of decimals.
    fn print_number(&mut self, value: f64, decimals: u8);

    /// Switch glyph lookup to the full code page 437 table.
    fn enable_extended_glyphs(&mut self, enabled: bool);

    /// Emit one raw glyph byte.
    fn write_byte(&mut self, byte: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Read by the core, advanced elsewhere.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

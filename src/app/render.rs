//! Status screens.
//!
//! Each screen is a complete frame: clear, set the colour, draw, flush once.
//! The layout targets a 128×64 panel with 6×8 px glyphs at scale 1.

use core::fmt::Write as _;

use heapless::String;

use super::ports::DisplayPort;

/// Code page 437 byte drawn as the degree sign on the panel font.
pub const DEGREE_GLYPH: u8 = 167;

const SMALL: u8 = 1;
const LARGE: u8 = 2;

/// Which screen was drawn on the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RenderMode {
    Startup,
    Buffering,
    Fault,
    Normal,
}

/// Splash shown once by `setup()`.
pub fn startup(display: &mut impl DisplayPort, color: u16) {
    display.clear();
    display.set_color(color);
    display.set_text_scale(SMALL);
    display.set_cursor(0, 0);
    display.print_text("Water Heater");
    display.flush();
}

/// Progress while the median window fills.
pub fn buffering(display: &mut impl DisplayPort, color: u16, count: usize, capacity: usize) {
    let mut line: String<32> = String::new();
    // 32 bytes always fit the message for any realistic window size.
    let _ = write!(line, "Gathering data... {}/{}", count, capacity);

    display.clear();
    display.set_color(color);
    display.set_text_scale(SMALL);
    display.set_cursor(0, 0);
    display.print_text(&line);
    display.flush();
}

/// The thermocouple flagged the latest sample.
pub fn fault(display: &mut impl DisplayPort, color: u16) {
    display.clear();
    display.set_color(color);
    display.set_text_scale(SMALL);
    display.set_cursor(0, 10);
    display.print_text("Sensor Fault!");
    display.flush();
}

/// Median temperature and heater state.
pub fn normal(display: &mut impl DisplayPort, color: u16, median_c: f64, heater_on: bool) {
    display.clear();
    display.set_color(color);

    // Temperature
    display.set_text_scale(SMALL);
    display.set_cursor(0, 0);
    display.print_text("Median Temp:");
    display.set_text_scale(LARGE);
    display.set_cursor(0, 10);
    display.print_number(median_c, 1);
    display.enable_extended_glyphs(true);
    display.write_byte(DEGREE_GLYPH);
    display.print_text("C");

    // Heater
    display.set_text_scale(SMALL);
    display.set_cursor(0, 35);
    display.print_text("Heater:");
    display.set_text_scale(LARGE);
    display.set_cursor(0, 45);
    display.print_text(if heater_on { "ON" } else { "OFF" });

    display.flush();
}

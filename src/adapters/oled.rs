//! SSD1306 OLED display adapter.
//!
//! Draws the status screens on a 128×64 monochrome panel through
//! `embedded-graphics`.  Text scale 1 uses a 6×10 font and scale 2 a 9×15
//! font.  Both are ISO 8859-1 fonts, so the degree sign is a real glyph.
//! Drawing goes to the driver's frame buffer; nothing reaches the panel
//! until [`flush`](DisplayPort::flush).

use core::fmt::Write as _;

use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use log::warn;
use ssd1306::Ssd1306;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;

use crate::app::ports::DisplayPort;
use crate::app::render::DEGREE_GLYPH;

/// A buffered monochrome panel that can push its frame to the glass.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    fn push_frame(&mut self) -> Result<(), Self::Error>;
}

impl<DI, SIZE> Panel for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn push_frame(&mut self) -> Result<(), Self::Error> {
        self.flush()
    }
}

pub struct OledDisplay<P> {
    panel: P,
    cursor: Point,
    scale: u8,
    color: BinaryColor,
    extended: bool,
}

impl<P> OledDisplay<P>
where
    P: Panel,
    P::Error: core::fmt::Debug,
{
    /// Wrap an initialised panel.
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            cursor: Point::zero(),
            scale: 1,
            color: BinaryColor::On,
            extended: false,
        }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Top-left corner of the next glyph.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn release(self) -> P {
        self.panel
    }

    fn font(&self) -> &'static MonoFont<'static> {
        if self.scale >= 2 { &FONT_9X15 } else { &FONT_6X10 }
    }

    /// Character drawn for a raw byte.  Byte 167 (248 on some code pages)
    /// is the degree sign once extended glyphs are enabled.
    fn glyph(&self, byte: u8) -> char {
        match byte {
            0x20..=0x7E => char::from(byte),
            DEGREE_GLYPH | 248 if self.extended => '\u{00b0}',
            _ => '?',
        }
    }

    fn draw(&mut self, text: &str) {
        let style = MonoTextStyle::new(self.font(), self.color);
        // Buffered drawing cannot fail; the panel clips off-screen pixels.
        if let Ok(next) =
            Text::with_baseline(text, self.cursor, style, Baseline::Top).draw(&mut self.panel)
        {
            self.cursor = next;
        }
    }
}

impl<P> DisplayPort for OledDisplay<P>
where
    P: Panel,
    P::Error: core::fmt::Debug,
{
    fn clear(&mut self) {
        self.panel.clear(BinaryColor::Off).ok();
    }

    fn flush(&mut self) {
        if let Err(e) = self.panel.push_frame() {
            warn!("Display flush failed: {:?}", e);
        }
    }

    fn set_text_scale(&mut self, scale: u8) {
        self.scale = scale.max(1);
    }

    fn set_color(&mut self, color: u16) {
        self.color = if color == 0 {
            BinaryColor::Off
        } else {
            BinaryColor::On
        };
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print_text(&mut self, text: &str) {
        self.draw(text);
    }

    fn print_number(&mut self, value: f64, decimals: u8) {
        let mut buf: String<32> = String::new();
        let _ = write!(buf, "{:.*}", usize::from(decimals), value);
        self.draw(&buf);
    }

    fn enable_extended_glyphs(&mut self, enabled: bool) {
        self.extended = enabled;
    }

    fn write_byte(&mut self, byte: u8) {
        let mut utf8 = [0u8; 4];
        let c = self.glyph(byte);
        self.draw(c.encode_utf8(&mut utf8));
    }
}

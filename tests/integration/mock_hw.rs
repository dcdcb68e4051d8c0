//! Mock hardware adapters for integration tests.
//!
//! Every mock is a cheap `Clone` handle onto shared state, so a test keeps
//! one handle to script and inspect while the thermostat borrows another.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use thermostat::app::ports::{ActuatorPort, Clock, DisplayPort, TemperaturePort, TemperatureReading};

// ── MockThermocouple ──────────────────────────────────────────

#[derive(Debug)]
struct Script {
    queued: VecDeque<TemperatureReading>,
    fallback: TemperatureReading,
    reads: usize,
}

/// Returns queued readings first, then a settable constant.
#[derive(Debug, Clone)]
pub struct MockThermocouple {
    script: Rc<RefCell<Script>>,
}

#[allow(dead_code)]
impl MockThermocouple {
    pub fn constant(celsius: f64) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                queued: VecDeque::new(),
                fallback: TemperatureReading::ok(celsius),
                reads: 0,
            })),
        }
    }

    /// Readings served (in order) before falling back to the constant.
    pub fn sequence(samples: &[f64]) -> Self {
        let tc = Self::constant(samples.last().copied().unwrap_or(0.0));
        tc.queue(samples);
        tc
    }

    pub fn queue(&self, samples: &[f64]) {
        self.script
            .borrow_mut()
            .queued
            .extend(samples.iter().map(|&c| TemperatureReading::ok(c)));
    }

    pub fn set(&self, celsius: f64) {
        self.script.borrow_mut().fallback.celsius = celsius;
    }

    pub fn set_fault(&self, fault: bool) {
        self.script.borrow_mut().fallback.fault = fault;
    }

    pub fn reads(&self) -> usize {
        self.script.borrow().reads
    }
}

impl TemperaturePort for MockThermocouple {
    fn read(&mut self) -> TemperatureReading {
        let mut s = self.script.borrow_mut();
        s.reads += 1;
        let fallback = s.fallback;
        s.queued.pop_front().unwrap_or(fallback)
    }
}

// ── MockServo ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoCall {
    Write(u8),
    Attach,
    Detach,
}

#[derive(Debug, Default)]
struct ServoState {
    calls: Vec<ServoCall>,
    attached: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MockServo {
    state: Rc<RefCell<ServoState>>,
}

#[allow(dead_code)]
impl MockServo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ServoCall> {
        self.state.borrow().calls.clone()
    }

    pub fn writes(&self) -> Vec<u8> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                ServoCall::Write(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn detach_count(&self) -> usize {
        self.count(ServoCall::Detach)
    }

    pub fn attach_count(&self) -> usize {
        self.count(ServoCall::Attach)
    }

    pub fn attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// Forget the call history (e.g. after `setup()`).
    pub fn reset_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    fn count(&self, call: ServoCall) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| **c == call)
            .count()
    }
}

impl ActuatorPort for MockServo {
    fn write(&mut self, position: u8) {
        self.state.borrow_mut().calls.push(ServoCall::Write(position));
    }

    fn attach(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(ServoCall::Attach);
        s.attached = true;
    }

    fn detach(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(ServoCall::Detach);
        s.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Clear,
    Flush,
    TextScale(u8),
    Color(u16),
    Cursor(i32, i32),
    Text(String),
    Number(f64, u8),
    ExtendedGlyphs(bool),
    Byte(u8),
}

#[derive(Debug, Clone, Default)]
pub struct MockDisplay {
    calls: Rc<RefCell<Vec<DisplayCall>>>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded calls.
    pub fn take(&self) -> Vec<DisplayCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    /// Every string printed since the last `take`.
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                DisplayCall::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn flushes(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| **c == DisplayCall::Flush)
            .count()
    }

    fn record(&self, call: DisplayCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) {
        self.record(DisplayCall::Clear);
    }
    fn flush(&mut self) {
        self.record(DisplayCall::Flush);
    }
    fn set_text_scale(&mut self, scale: u8) {
        self.record(DisplayCall::TextScale(scale));
    }
    fn set_color(&mut self, color: u16) {
        self.record(DisplayCall::Color(color));
    }
    fn set_cursor(&mut self, x: i32, y: i32) {
        self.record(DisplayCall::Cursor(x, y));
    }
    fn print_text(&mut self, text: &str) {
        self.record(DisplayCall::Text(text.to_owned()));
    }
    fn print_number(&mut self, value: f64, decimals: u8) {
        self.record(DisplayCall::Number(value, decimals));
    }
    fn enable_extended_glyphs(&mut self, enabled: bool) {
        self.record(DisplayCall::ExtendedGlyphs(enabled));
    }
    fn write_byte(&mut self, byte: u8) {
        self.record(DisplayCall::Byte(byte));
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when the test says so.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn at(ms: u64) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

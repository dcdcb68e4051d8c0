//! Thermostat service: the hexagonal core.
//!
//! [`Thermostat`] owns the median window, the hysteresis state and the servo
//! idle timer.  It borrows the four ports for its whole lifetime and exposes
//! two operations: [`setup`](Thermostat::setup) once at boot and
//! [`step`](Thermostat::step) once per control period.
//!
//! ```text
//!  TemperaturePort ──▶ ┌──────────────────────────┐ ──▶ ActuatorPort
//!                      │        Thermostat         │
//!            Clock ──▶ │ Median · Hysteresis · Idle│ ──▶ DisplayPort
//!                      └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::{
    HEATER_OFF_ABOVE_C, HEATER_ON_BELOW_C, MEDIAN_WINDOW_SIZE, SERVO_DETACH_DELAY_MS,
    SERVO_HEATER_OFF_POS,
};
use crate::control::hysteresis::{HeaterCommand, Hysteresis};
use crate::control::idle::IdleTimer;
use crate::control::median::MedianWindow;

use super::ports::{ActuatorPort, Clock, DisplayPort, TemperaturePort};
use super::render::{self, RenderMode};
use super::telemetry::StatusSnapshot;

/// Foreground colour used when none is configured.
pub const DEFAULT_TEXT_COLOR: u16 = 1;

/// What a single [`Thermostat::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The window is still filling; `count` samples so far.
    Buffering { count: usize },
    /// Window full but the latest read was faulted.  The median still drove
    /// the heater decision.
    Fault { median_c: f64 },
    Normal { median_c: f64 },
}

pub struct Thermostat<'a, T, A, D, C> {
    sensor: &'a mut T,
    actuator: &'a mut A,
    display: &'a mut D,
    clock: &'a C,

    window: MedianWindow<MEDIAN_WINDOW_SIZE>,
    hysteresis: Hysteresis,
    idle: IdleTimer,
    text_color: u16,

    last_median_c: Option<f64>,
    peak_c: Option<f64>,
    fault_active: bool,
    screen: RenderMode,
    steps: u64,
}

impl<'a, T, A, D, C> Thermostat<'a, T, A, D, C>
where
    T: TemperaturePort,
    A: ActuatorPort,
    D: DisplayPort,
    C: Clock,
{
    /// Bind the controller to its ports.  Nothing is driven until
    /// [`setup`](Self::setup).
    pub fn new(sensor: &'a mut T, actuator: &'a mut A, display: &'a mut D, clock: &'a C) -> Self {
        Self {
            sensor,
            actuator,
            display,
            clock,
            window: MedianWindow::new(),
            hysteresis: Hysteresis::new(HEATER_ON_BELOW_C, HEATER_OFF_ABOVE_C),
            idle: IdleTimer::new(SERVO_DETACH_DELAY_MS),
            text_color: DEFAULT_TEXT_COLOR,
            last_median_c: None,
            peak_c: None,
            fault_active: false,
            screen: RenderMode::Startup,
            steps: 0,
        }
    }

    /// Override the display foreground colour.
    #[must_use]
    pub fn with_text_color(mut self, color: u16) -> Self {
        self.text_color = color;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the valve closed, start the idle timer and draw the splash.
    pub fn setup(&mut self) {
        self.ensure_attached();
        self.actuator.write(SERVO_HEATER_OFF_POS);
        self.hysteresis.reset();
        self.idle.mark(self.clock.now_millis());

        render::startup(&mut *self.display, self.text_color);
        self.screen = RenderMode::Startup;
        info!(
            "Thermostat ready: on below {:.1}\u{00b0}C, off above {:.1}\u{00b0}C, window {}",
            HEATER_ON_BELOW_C, HEATER_OFF_ABOVE_C, MEDIAN_WINDOW_SIZE
        );
    }

    // ── Per-step orchestration ────────────────────────────────

    /// Run one control cycle: sample → filter → decide → idle → render.
    pub fn step(&mut self) -> StepOutcome {
        self.steps = self.steps.saturating_add(1);

        // 1. Sample
        let reading = self.sensor.read();
        self.track_fault(reading.fault);
        self.window.push(reading.celsius);

        // 2. Wait for a full window
        let Some(median_c) = self.window.median() else {
            let count = self.window.len();
            debug!("Buffering {}/{}", count, self.window.capacity());
            render::buffering(&mut *self.display, self.text_color, count, self.window.capacity());
            self.screen = RenderMode::Buffering;
            return StepOutcome::Buffering { count };
        };
        self.last_median_c = Some(median_c);

        let now = self.clock.now_millis();

        // 3. Hysteresis decision (fault flag deliberately not consulted)
        if let Some(cmd) = self.hysteresis.update(median_c) {
            self.apply(cmd, median_c, now);
        }

        // 4. Idle detach
        self.manage_idle(now);

        // 5. Render
        if reading.fault {
            render::fault(&mut *self.display, self.text_color);
            self.screen = RenderMode::Fault;
            StepOutcome::Fault { median_c }
        } else {
            if median_c.is_finite() && self.peak_c.is_none_or(|peak| median_c > peak) {
                self.peak_c = Some(median_c);
            }
            render::normal(
                &mut *self.display,
                self.text_color,
                median_c,
                self.hysteresis.is_heater_on(),
            );
            self.screen = RenderMode::Normal;
            StepOutcome::Normal { median_c }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_heater_on(&self) -> bool {
        self.hysteresis.is_heater_on()
    }

    /// Clock time of the last servo write (or of setup).
    pub fn last_actuator_move_ms(&self) -> u64 {
        self.idle.last_move_ms()
    }

    /// Highest finite median shown on the normal screen.
    pub fn peak_temperature(&self) -> Option<f64> {
        self.peak_c
    }

    pub fn last_median(&self) -> Option<f64> {
        self.last_median_c
    }

    /// Samples currently held in the median window.
    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// Whether the most recent reading was faulted.
    pub fn fault_active(&self) -> bool {
        self.fault_active
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            heater_on: self.hysteresis.is_heater_on(),
            median_c: self.last_median_c,
            peak_c: self.peak_c,
            window_fill: self.window.len(),
            window_capacity: self.window.capacity(),
            sensor_fault: self.fault_active,
            servo_attached: self.actuator.is_attached(),
            last_servo_move_ms: self.idle.last_move_ms(),
            steps: self.steps,
            screen: self.screen,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn ensure_attached(&mut self) {
        if !self.actuator.is_attached() {
            self.actuator.attach();
        }
    }

    fn apply(&mut self, cmd: HeaterCommand, median_c: f64, now: u64) {
        self.ensure_attached();
        self.actuator.write(cmd.position());
        self.idle.mark(now);
        match cmd {
            HeaterCommand::TurnOn => info!("Heater ON at median {:.1}\u{00b0}C", median_c),
            HeaterCommand::TurnOff => info!("Heater OFF at median {:.1}\u{00b0}C", median_c),
        }
    }

    fn manage_idle(&mut self, now: u64) {
        if self.actuator.is_attached() && self.idle.expired(now) {
            self.actuator.detach();
            debug!(
                "Servo detached after {} ms idle",
                now.wrapping_sub(self.idle.last_move_ms())
            );
        }
    }

    /// Edge-triggered fault logging.
    fn track_fault(&mut self, fault: bool) {
        if fault && !self.fault_active {
            warn!("Thermocouple fault reported");
        } else if !fault && self.fault_active {
            info!("Thermocouple fault cleared");
        }
        self.fault_active = fault;
    }
}

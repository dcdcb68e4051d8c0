//! Servo idle timer.
//!
//! A hobby servo holding a valve draws current and hums for as long as it
//! receives pulses.  The thermostat only needs it during a transition, so it
//! is detached once no move has happened for the idle timeout.

#[derive(Debug, Clone, Copy)]
pub struct IdleTimer {
    last_move_ms: u64,
    timeout_ms: u64,
}

impl IdleTimer {
    pub const fn new(timeout_ms: u64) -> Self {
        Self {
            last_move_ms: 0,
            timeout_ms,
        }
    }

    /// Record an actuator move at `now_ms`.
    pub fn mark(&mut self, now_ms: u64) {
        self.last_move_ms = now_ms;
    }

    /// True once strictly more than the timeout has elapsed since the last
    /// move.  Wrapping subtraction keeps this correct across a counter wrap.
    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms.wrapping_sub(self.last_move_ms) > self.timeout_ms
    }

    pub fn last_move_ms(&self) -> u64 {
        self.last_move_ms
    }
}

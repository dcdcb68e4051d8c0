//! Control primitives: pure state, no I/O.
//!
//! | Module       | Role                                             |
//! |--------------|--------------------------------------------------|
//! | `median`     | Sliding-window median over the last N samples    |
//! | `hysteresis` | Two-point on/off decision with a dead band       |
//! | `idle`       | Servo idle timer (detach after inactivity)       |

pub mod hysteresis;
pub mod idle;
pub mod median;

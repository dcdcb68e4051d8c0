//! Peripheral drivers.  Generic over `embedded-hal` traits, no port logic.

pub mod max31855;
pub mod servo;

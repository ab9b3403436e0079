//! Wall-clock access for the time-of-day greeting.

use chrono::{Local, Timelike};

/// Source of the local hour of day (0-23), read at response time.
pub trait Clock: Send + Sync {
    fn hour(&self) -> u32;
}

/// The host's local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// A clock stuck at one hour.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.0
    }
}

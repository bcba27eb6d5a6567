//! Sources of the current moment.

use chrono::{Local, NaiveDateTime};

use super::types::CurrentMoment;

/// Provides the instant a request is evaluated at.
pub trait Clock: Send + Sync {
    fn now(&self) -> CurrentMoment;
}

/// Reads the server's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CurrentMoment {
        CurrentMoment::new(Local::now().naive_local())
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> CurrentMoment {
        CurrentMoment::new(self.0)
    }
}

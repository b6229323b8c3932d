//! Millisecond clock sources
//!
//! The game core never reads the wall clock itself. Hosts sample a `Clock`
//! once per tick and pass the timestamp down, so tests can drive time by hand.

use std::time::Instant;

use crate::core::types::Timestamp;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Synthetic clock that only moves when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Timestamp,
}

impl ManualClock {
    pub fn starting_at(now: Timestamp) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, ms: u64) -> Timestamp {
        self.now += ms;
        self.now
    }

    pub fn set(&mut self, now: Timestamp) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let mut clock = ManualClock::starting_at(100);
        assert_eq!(clock.now(), 100);
        assert_eq!(clock.advance(33), 133);
        clock.set(10);
        assert_eq!(clock.now(), 10);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}

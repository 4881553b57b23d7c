//! Per-player countdown clocks.

use super::Slot;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of ticking a clock once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Time is left; carries the remaining seconds.
    Running(u32),
    /// The clock hit zero on this tick (or was already empty).
    Expired,
}

/// Remaining whole seconds for one player. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    initial: u32,
    remaining: u32,
}

impl Clock {
    /// Creates a full clock.
    pub fn new(seconds: u32) -> Self {
        Self {
            initial: seconds,
            remaining: seconds,
        }
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds the clock started with.
    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// True once the clock reads zero.
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Removes one second, saturating at zero.
    pub fn tick(&mut self) -> ClockTick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            ClockTick::Expired
        } else {
            ClockTick::Running(self.remaining)
        }
    }
}

/// The two clocks of a session, index-aligned with the seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clocks {
    clocks: [Clock; 2],
}

impl Clocks {
    /// Both sides start with `seconds`.
    #[instrument]
    pub fn new(seconds: u32) -> Self {
        Self {
            clocks: [Clock::new(seconds), Clock::new(seconds)],
        }
    }

    /// Returns the clock for a seat.
    pub fn get(&self, slot: Slot) -> &Clock {
        &self.clocks[slot.index()]
    }

    /// Remaining seconds for both seats, in seat order.
    pub fn remaining(&self) -> [u32; 2] {
        [self.clocks[0].remaining(), self.clocks[1].remaining()]
    }

    /// Ticks only the running seat's clock; the other one is untouched.
    #[instrument(skip(self))]
    pub fn tick(&mut self, running: Slot) -> ClockTick {
        let tick = self.clocks[running.index()].tick();
        debug!(?running, ?tick, "Clock ticked");
        tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_down() {
        let mut clock = Clock::new(3);
        assert_eq!(clock.tick(), ClockTick::Running(2));
        assert_eq!(clock.tick(), ClockTick::Running(1));
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert!(clock.is_expired());
    }

    #[test]
    fn test_tick_never_goes_negative() {
        let mut clock = Clock::new(0);
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.initial(), 0);
    }

    #[test]
    fn test_only_running_clock_moves() {
        let mut clocks = Clocks::new(10);
        clocks.tick(Slot::First);
        clocks.tick(Slot::First);
        clocks.tick(Slot::Second);
        assert_eq!(clocks.remaining(), [8, 9]);
    }
}

//! Minute and day tick detection

use core::ops::BitOr;

use chrono::{NaiveDateTime, Timelike};

/// Set of time units that changed since the last tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const MINUTE: Self = Self(1 << 0);
    pub const DAY: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Turns a stream of wall-clock readings into minute and day ticks.
pub struct TickTimer {
    /// Reading at the previous poll
    last: NaiveDateTime,
}

impl TickTimer {
    /// Start tracking from `now`; the first change after it produces a tick.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { last: now }
    }

    /// Report which units changed since the previous poll.
    pub fn poll(&mut self, now: NaiveDateTime) -> TimeUnits {
        let mut units = TimeUnits::NONE;
        if now.date() != self.last.date() {
            units = units | TimeUnits::DAY | TimeUnits::MINUTE;
        } else if (now.hour(), now.minute()) != (self.last.hour(), self.last.minute()) {
            units = units | TimeUnits::MINUTE;
        }
        self.last = now;
        units
    }
}

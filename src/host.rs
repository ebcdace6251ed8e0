//! Services provided by the device runtime

use chrono::NaiveDateTime;

use crate::state::BatteryState;

/// Host services the watchface reads from and acts on.
///
/// The firmware implements this on top of the nRF52832 peripherals,
/// tests use `mock::MockHost`.
pub trait Host {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Whether the user prefers 24-hour time.
    ///
    /// Read on every tick, so changes apply from the next minute on.
    fn is_24h_style(&self) -> bool;

    /// Current battery state, independent of change notifications
    fn peek_battery(&self) -> BatteryState;

    /// Current link state, independent of change notifications
    fn peek_connection(&self) -> bool;

    /// Fire-and-forget double vibration pulse
    fn double_pulse(&mut self);
}

#[cfg(test)]
pub(crate) mod mock {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::Host;
    use crate::state::BatteryState;

    /// Host double with fixed readings that counts haptic alerts
    pub struct MockHost {
        pub now: NaiveDateTime,
        pub clock_24h: bool,
        pub battery: BatteryState,
        pub connected: bool,
        pub pulses: usize,
    }

    impl MockHost {
        pub fn new() -> Self {
            Self {
                now: at(2006, 1, 2, 13, 5),
                clock_24h: true,
                battery: BatteryState::new(80, false),
                connected: true,
                pulses: 0,
            }
        }
    }

    impl Host for MockHost {
        fn now(&self) -> NaiveDateTime {
            self.now
        }

        fn is_24h_style(&self) -> bool {
            self.clock_24h
        }

        fn peek_battery(&self) -> BatteryState {
            self.battery
        }

        fn peek_connection(&self) -> bool {
            self.connected
        }

        fn double_pulse(&mut self) {
            self.pulses += 1;
        }
    }

    /// Wall-clock instant at minute resolution
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }
}

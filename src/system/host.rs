//! Host services backed by the PineTime hardware

use chrono::NaiveDateTime;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use pinetime_watchface::{config::CLOCK_24H, state::BatteryState, Host};

use super::time::TimeManager;

/// State the UI task keeps about the rest of the system
pub struct FirmwareHost {
    /// Wall clock
    clock: TimeManager,
    /// Last battery state received from the battery task
    battery: BatteryState,
    /// Last link state received from the Bluetooth task
    connected: bool,
    /// Wakes the vibration task
    vibrate: &'static Signal<ThreadModeRawMutex, ()>,
}

impl FirmwareHost {
    pub fn new(
        clock: TimeManager,
        battery: BatteryState,
        vibrate: &'static Signal<ThreadModeRawMutex, ()>,
    ) -> Self {
        Self {
            clock,
            battery,
            // Nothing is connected right after boot
            connected: false,
            vibrate,
        }
    }

    pub fn set_battery(&mut self, state: BatteryState) {
        self.battery = state;
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Host for FirmwareHost {
    fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    fn is_24h_style(&self) -> bool {
        CLOCK_24H
    }

    fn peek_battery(&self) -> BatteryState {
        self.battery
    }

    fn peek_connection(&self) -> bool {
        self.connected
    }

    fn double_pulse(&mut self) {
        self.vibrate.signal(());
    }
}

//! Control the vibration motor
//!
//! Implementation based upon https://github.com/tstellanova/cst816s/blob/master/examples/touchpad.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_time::Timer;
use pinetime_watchface::config::HAPTIC_PULSE_MS;

struct VibratorConfig<'a> {
    /// Motor enable pin (inverted)
    pin_enable: Output<'a, P0_16>,
}

pub struct Vibrator {
    /// Vibrator configuration
    config: VibratorConfig<'static>,
}

impl Vibrator {
    /// Configure vibrator on boot
    pub fn init(enable_pin: Output<'static, P0_16>) -> Self {
        let mut vibrator = Self {
            config: VibratorConfig {
                pin_enable: enable_pin,
            },
        };
        vibrator.off();
        vibrator
    }

    /// Pulse the vibrator `times` times, pausing one pulse length in between.
    pub async fn pulse(&mut self, length_ms: u64, times: u8) {
        for i in 0..times {
            if i > 0 {
                Timer::after_millis(length_ms).await;
            }
            self.on();
            Timer::after_millis(length_ms).await;
            self.off();
        }
    }

    /// Two short pulses
    pub async fn double_pulse(&mut self) {
        self.pulse(HAPTIC_PULSE_MS, 2).await;
    }

    fn on(&mut self) {
        self.config.pin_enable.set_low();
    }

    fn off(&mut self) {
        self.config.pin_enable.set_high();
    }
}

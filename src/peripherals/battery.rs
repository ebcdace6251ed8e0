//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::state::{BatteryState, Error};

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last measured state
    state: BatteryState,
}

impl Battery {
    /// Configure battery settings on boot and take a first measurement
    pub async fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        let mut battery = Self {
            config: BatteryConfig {
                adc,
                pin_charge_indication: charge_pin,
            },
            state: BatteryState::default(),
        };
        if let Err(e) = battery.update().await {
            defmt::warn!("Initial battery measurement failed: {}", e);
        }
        battery
    }

    /// Charging state of the battery
    pub fn is_charging(&self) -> bool {
        self.config.pin_charge_indication.is_low()
    }

    /// State from the last call to `update()`
    pub fn state(&self) -> BatteryState {
        self.state
    }

    /// Measure the battery. Return whether or not the state changed.
    pub async fn update(&mut self) -> Result<bool, Error> {
        let mut buf = [0; 1];
        self.config.adc.sample(&mut buf).await;
        let state = BatteryState::from_adc_sample(buf[0], self.is_charging())?;

        let changed = state != self.state;
        self.state = state;
        Ok(changed)
    }
}

//! Application state
//!
//! Battery conversion based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embedded_graphics::primitives::Rectangle;

use crate::ui::{layout::Frames, theme::Theme};

/// Charge level and charger state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// Battery percentage (0–100)
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

impl BatteryState {
    /// Create a battery state, clamping `percent` to 100.
    pub fn new(percent: u8, charging: bool) -> Self {
        Self {
            percent: percent.min(100),
            charging,
        }
    }

    /// Estimate the battery state from the battery voltage in millivolts.
    pub fn from_millivolts(voltage: u16, charging: bool) -> Self {
        // Use fixed data points and linear interpolation in between
        // to estimate battery capacity.
        let percent = match voltage {
            0..=3449 => 0,
            3450..=3699 => (voltage - 3450) / 5,
            3700..=4199 => 50 + (voltage - 3700) / 10,
            _ => 100,
        };
        Self::new(percent as u8, charging)
    }

    /// Estimate the battery state from a raw 12-bit SAADC sample.
    pub fn from_adc_sample(raw: i16, charging: bool) -> Result<Self, Error> {
        Ok(Self::from_millivolts(millivolts(raw)?, charging))
    }
}

/// Convert an ADC measurement into a battery voltage in millivolts.
pub fn millivolts(raw: i16) -> Result<u16, Error> {
    match raw {
        0..=4095 => {
            // Keep as 32 bit for multiplication
            let adc_val = raw as u32;
            // Multiply the ADC value by 2 * 1000 for mV and divide by (2 ^ 12 / 3.3V reference)
            Ok((adc_val * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidMeasurement,
}

/// Everything the renderers read on a redraw
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Usable display area
    pub bounds: Rectangle,
    /// Last known battery state
    pub battery: BatteryState,
    /// Last known link state
    pub connected: bool,
    /// Element rectangles for the current shape
    pub frames: Frames,
    /// Colors for the current palette
    pub theme: Theme,
}

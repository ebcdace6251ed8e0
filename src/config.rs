//! Watchface configuration

use crate::ui::layout::ShapeVariant;

/// Display width of the PineTime LCD
pub const LCD_W: u16 = 240;
/// Display height of the PineTime LCD
pub const LCD_H: u16 = 240;

/// Offset of local time from UTC
pub const UTC_OFFSET_SECS: i32 = 3_600;
/// Show the time in 24-hour style
pub const CLOCK_24H: bool = true;

/// Interval between battery measurements
pub const BATTERY_POLL_SECS: u64 = 1;
/// Length of a single vibration pulse
pub const HAPTIC_PULSE_MS: u64 = 200;

/// Color capabilities of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Palette {
    /// Full color theme
    Color,
    /// Black on white
    Monochrome,
}

/// Settings chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchfaceConfig {
    /// Display form factor
    pub shape: ShapeVariant,
    /// Color theme
    pub palette: Palette,
}

impl WatchfaceConfig {
    /// PineTime: square color LCD
    pub const DEFAULT: Self = Self {
        shape: ShapeVariant::Rectangular,
        palette: Palette::Color,
    };
}

impl Default for WatchfaceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

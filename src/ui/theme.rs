//! Watchface colors

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use super::ColorMode;
use crate::config::Palette;

// Pebble-style 64 color palette, expanded to RGB565
pub const OXFORD_BLUE: Rgb565 = Rgb565::new(0, 0, 10);
pub const BLUE_MOON: Rgb565 = Rgb565::new(0, 21, 31);
pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);
pub const RED: Rgb565 = Rgb565::new(31, 0, 0);
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);
pub const YELLOW: Rgb565 = Rgb565::new(31, 63, 0);

/// Colors for each visual role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: ColorMode,
    pub text: ColorMode,
    /// Battery bar above the low threshold
    pub full: ColorMode,
    /// Battery bar at or below the low threshold
    pub low: ColorMode,
    /// Battery outline
    pub outline: ColorMode,
    /// Charging bolt
    pub charging: ColorMode,
}

impl Theme {
    pub const COLOR: Self = Self {
        background: OXFORD_BLUE,
        text: BLUE_MOON,
        full: GREEN,
        low: RED,
        outline: LIGHT_GRAY,
        charging: YELLOW,
    };

    pub const MONOCHROME: Self = Self {
        background: Rgb565::WHITE,
        text: Rgb565::BLACK,
        full: Rgb565::BLACK,
        low: Rgb565::BLACK,
        outline: Rgb565::BLACK,
        charging: Rgb565::BLACK,
    };

    pub fn for_palette(palette: Palette) -> Self {
        match palette {
            Palette::Color => Self::COLOR,
            Palette::Monochrome => Self::MONOCHROME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roles_are_distinct() {
        let t = Theme::for_palette(Palette::Color);
        let roles = [t.background, t.text, t.full, t.low, t.outline, t.charging];
        for (i, a) in roles.iter().enumerate() {
            for b in &roles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_monochrome_collapses_foreground() {
        let t = Theme::for_palette(Palette::Monochrome);
        assert_eq!(t.full, t.low);
        assert_eq!(t.full, t.charging);
        assert_ne!(t.background, t.text);
    }
}

//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

pub mod assets;
pub mod battery;
pub mod clock;
pub mod connectivity;
pub mod layout;
pub mod theme;
mod watchface;

pub use watchface::{Layer, Watchface};

/// Display color used throughout the watchface
pub type ColorMode = embedded_graphics::pixelcolor::Rgb565;

#[cfg(test)]
pub(crate) mod testing {
    use core::convert::Infallible;

    use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

    /// In-memory display for rendering checks
    pub struct Framebuffer {
        size: Size,
        pixels: Vec<Option<Rgb565>>,
    }

    impl Framebuffer {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                pixels: vec![None; (width * height) as usize],
            }
        }

        /// Color at `(x, y)`, `None` if never drawn
        pub fn get(&self, x: i32, y: i32) -> Option<Rgb565> {
            if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
                return None;
            }
            self.pixels[(y as u32 * self.size.width + x as u32) as usize]
        }

        /// Forget everything drawn so far
        pub fn clear(&mut self) {
            self.pixels.fill(None);
        }

        /// Number of pixels drawn in any color
        pub fn drawn(&self) -> usize {
            self.pixels.iter().filter(|p| p.is_some()).count()
        }

        /// Number of pixels drawn in `color`
        pub fn count(&self, color: Rgb565) -> usize {
            self.pixels.iter().filter(|p| **p == Some(color)).count()
        }

        /// Number of pixels drawn in `color` inside a row range
        pub fn count_in_rows(&self, color: Rgb565, rows: core::ops::Range<i32>) -> usize {
            rows.map(|y| {
                (0..self.size.width as i32)
                    .filter(|x| self.get(*x, y) == Some(color))
                    .count()
            })
            .sum()
        }
    }

    impl OriginDimensions for Framebuffer {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for Framebuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0
                    && point.y >= 0
                    && (point.x as u32) < self.size.width
                    && (point.y as u32) < self.size.height
                {
                    let idx = (point.y as u32 * self.size.width + point.x as u32) as usize;
                    self.pixels[idx] = Some(color);
                }
            }
            Ok(())
        }
    }
}

//! Fonts and bitmaps
//!
//! Loaded once when the watchface is built and never changed afterwards.

use embedded_graphics::{mono_font::MonoFont, prelude::*};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use super::ColorMode;

/// 1 bit per pixel image, rows padded to whole bytes, MSB first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap<'a> {
    size: Size,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    pub const fn new(size: Size, data: &'a [u8]) -> Self {
        Self { size, data }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn is_set(&self, x: u32, y: u32) -> bool {
        let stride = (self.size.width as usize + 7) / 8;
        let idx = y as usize * stride + x as usize / 8;
        // Short data reads as unset pixels
        self.data
            .get(idx)
            .map_or(false, |byte| byte & (0x80 >> (x % 8)) != 0)
    }

    /// Draw the set pixels in `color`, leaving the others untouched.
    pub fn draw<D>(&self, target: &mut D, top_left: Point, color: ColorMode) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let (w, h) = (self.size.width, self.size.height);
        let pixels = (0..h)
            .flat_map(move |y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_set(x, y))
            .map(|(x, y)| Pixel(top_left + Point::new(x as i32, y as i32), color));
        target.draw_iter(pixels)
    }
}

/// Bluetooth rune with a slash, shown while the link is down
#[rustfmt::skip]
const BT_DISCONNECTED_DATA: [u8; 32] = [
    0x00, 0x00, // ................
    0x41, 0x00, // .#.....#........
    0x21, 0x80, // ..#....##.......
    0x11, 0x40, // ...#...#.#......
    0x19, 0x20, // ...##..#..#.....
    0x0d, 0x10, // ....##.#...#....
    0x07, 0x20, // .....###..#.....
    0x01, 0xc0, // .......###......
    0x01, 0x80, // .......##.......
    0x03, 0x60, // ......##.##.....
    0x0d, 0x30, // ....##.#..##....
    0x11, 0x30, // ...#...#..##....
    0x01, 0x48, // .......#.#..#...
    0x01, 0x84, // .......##....#..
    0x01, 0x02, // .......#......#.
    0x00, 0x00, // ................
];

pub const BT_DISCONNECTED: Bitmap<'static> = Bitmap::new(Size::new(16, 16), &BT_DISCONNECTED_DATA);

/// Resources used by the watchface
#[derive(Clone, Copy)]
pub struct Assets {
    /// Font of the time label
    pub time_font: &'static MonoFont<'static>,
    /// Font of the date label
    pub text_font: &'static MonoFont<'static>,
    /// Character sprite, drawn if present
    pub background: Option<Bitmap<'static>>,
    /// Disconnected icon, drawn if present
    pub bt_icon: Option<Bitmap<'static>>,
}

impl Assets {
    /// Fonts and icons compiled into the firmware
    pub fn builtin() -> Self {
        Self {
            time_font: &PROFONT_24_POINT,
            text_font: &PROFONT_18_POINT,
            background: None,
            bt_icon: Some(BT_DISCONNECTED),
        }
    }
}

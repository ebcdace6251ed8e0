//! Time and date labels

use core::fmt;

use chrono::{Datelike, NaiveDate, Timelike};
use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyleBuilder},
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use super::{theme::Theme, ColorMode};

/// Length of "HH:MM"
pub const TIME_LEN: usize = 5;
/// Length of "Www Mmm DD"
pub const DATE_LEN: usize = 10;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Hour display preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    /// 00–23
    H24,
    /// 01–12, no AM/PM marker
    H12,
}

impl ClockStyle {
    pub fn from_24h_flag(is_24h: bool) -> Self {
        if is_24h {
            Self::H24
        } else {
            Self::H12
        }
    }
}

/// Write the time as zero-padded `HH:MM` into `buf`.
pub fn format_time<'a, T: Timelike>(
    buf: &'a mut [u8],
    time: &T,
    style: ClockStyle,
) -> Result<&'a str, fmt::Error> {
    let hour = match style {
        ClockStyle::H24 => time.hour(),
        ClockStyle::H12 => time.hour12().1,
    };
    format_no_std::show(buf, format_args!("{:02}:{:02}", hour, time.minute()))
}

/// Write the date as abbreviated weekday, month and two digit day into `buf`.
pub fn format_date<'a>(buf: &'a mut [u8], date: &NaiveDate) -> Result<&'a str, fmt::Error> {
    format_no_std::show(
        buf,
        format_args!(
            "{} {} {:02}",
            WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            MONTHS[date.month0() as usize],
            date.day()
        ),
    )
}

/// Single line of centered text with a fixed size buffer
pub struct Label<const N: usize> {
    str_buf: [u8; N],
    len: usize,
    frame: Rectangle,
}

impl<const N: usize> Label<N> {
    /// Create an empty label
    pub fn new(frame: Rectangle) -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
            frame,
        }
    }

    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or("")
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    /// Show the time. Keeps the previous text if it doesn't fit.
    pub fn set_time<T: Timelike>(&mut self, time: &T, style: ClockStyle) -> bool {
        let mut scratch = [0u8; N];
        match format_time(&mut scratch, time, style) {
            Ok(text) => {
                let len = text.len();
                self.store(scratch, len)
            }
            Err(_) => false,
        }
    }

    /// Show the date. Keeps the previous text if it doesn't fit.
    pub fn set_date(&mut self, date: &NaiveDate) -> bool {
        let mut scratch = [0u8; N];
        match format_date(&mut scratch, date) {
            Ok(text) => {
                let len = text.len();
                self.store(scratch, len)
            }
            Err(_) => false,
        }
    }

    /// Replace the text, returns whether it changed.
    fn store(&mut self, buf: [u8; N], len: usize) -> bool {
        let changed = buf[..len] != self.str_buf[..self.len];
        self.str_buf = buf;
        self.len = len;
        changed
    }

    /// Fill the frame with the background and draw the text centered at its top.
    pub fn draw<D>(
        &self,
        target: &mut D,
        font: &MonoFont<'_>,
        theme: &Theme,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.frame
            .into_styled(PrimitiveStyle::with_fill(theme.background))
            .draw(target)?;

        let character_style = MonoTextStyleBuilder::new()
            .font(font)
            .text_color(theme.text)
            .background_color(theme.background)
            .build();
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();

        let anchor = Point::new(self.frame.center().x, self.frame.top_left.y);
        Text::with_text_style(self.text(), anchor, character_style, text_style).draw(target)?;
        Ok(())
    }
}

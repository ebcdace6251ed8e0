//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_14, P0_18, P0_22, P0_23, P0_25, P0_26, SPI2},
    spim::Spim,
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
use mipidsi::{models::ST7789, Builder, Orientation};
use pinetime_watchface::config::{LCD_H, LCD_W};

/// ST7789 on the SPI bus
pub type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, P0_18>, Output<'static, P0_25>>,
    ST7789,
    Output<'static, P0_26>,
>;

/// Backlight brightness set on boot (0–7)
const BRIGHTNESS: u8 = 2;

/// Backlight control pins.
///
/// There are three active-low backlight pins, each connected to a FET that
/// toggles backlight power through a resistor.
///
/// - Low: 2.2 kΩ
/// - Mid: 100 Ω
/// - High: 30 Ω
pub struct BacklightPins<'a> {
    low: Output<'a, P0_14>,
    mid: Output<'a, P0_22>,
    high: Output<'a, P0_23>,
}

impl<'a> BacklightPins<'a> {
    /// Configure backlight pins on boot
    pub fn init(low: Output<'a, P0_14>, mid: Output<'a, P0_22>, high: Output<'a, P0_23>) -> Self {
        Self { low, mid, high }
    }

    /// Set the brightness level between 0 (off) and 7 (max brightness).
    fn set(&mut self, brightness: u8) {
        defmt::debug!("Setting backlight brightness to {}", brightness);
        if brightness & 0x01 > 0 {
            self.low.set_low();
        } else {
            self.low.set_high();
        }
        if brightness & 0x02 > 0 {
            self.mid.set_low();
        } else {
            self.mid.set_high();
        }
        if brightness & 0x04 > 0 {
            self.high.set_low();
        } else {
            self.high.set_high();
        }
    }
}

pub struct Display {
    /// Display instance
    lcd: Lcd,
    // Dropping the pins would switch the backlight off
    #[allow(unused)]
    pins_backlight: BacklightPins<'static>,
}

impl Display {
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
        mut backlight: BacklightPins<'static>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::InitFailed)?;
        backlight.set(BRIGHTNESS);

        Ok(Self {
            lcd,
            pins_backlight: backlight,
        })
    }

    /// Usable display area
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(LCD_W as u32, LCD_H as u32))
    }

    /// Draw target for the watchface
    pub fn lcd(&mut self) -> &mut Lcd {
        &mut self.lcd
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    InitFailed,
}

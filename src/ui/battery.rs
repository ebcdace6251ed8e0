//! Battery indicator
//!
//! A 66x8 outline holding a bar proportional to the charge, a cross when the
//! charge is unknown or empty, and a lightning bolt above it while charging.

use embedded_graphics::{
    prelude::*,
    primitives::{Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
};

use super::{
    layout::{BAR_HEIGHT, BAR_MAX_WIDTH},
    theme::Theme,
    ColorMode,
};
use crate::state::BatteryState;

/// Charge levels above this use the "full" color
pub const LOW_THRESHOLD: u8 = 40;

/// Bolt stroke x offsets from the bar origin
const BOLT_X: [i32; 6] = [3, 14, 23, 35, 46, 58];
/// Bolt stroke start y offsets from the bar origin
const BOLT_Y_START: [i32; 6] = [-4, -5, -4, -4, -5, -4];
/// Bolt stroke end y offsets from the bar origin
const BOLT_Y_END: [i32; 6] = [-7, -8, -6, -7, -8, -7];
/// Highest bolt row relative to the bar origin
const BOLT_TOP: i32 = -8;

/// Width of the bar in pixels for a charge level.
pub fn bar_width(percent: u8) -> u32 {
    u32::from(percent.min(100)) * BAR_MAX_WIDTH / 100
}

/// Color of the bar for a charge level.
pub fn bar_color(percent: u8, theme: &Theme) -> ColorMode {
    if percent > LOW_THRESHOLD {
        theme.full
    } else {
        theme.low
    }
}

/// Area covered by the indicator, bolt and outline included, for a bar at
/// `origin`.
pub fn battery_area(origin: Point) -> Rectangle {
    Rectangle::new(
        origin + Point::new(-1, BOLT_TOP),
        Size::new(BAR_MAX_WIDTH + 2, BAR_HEIGHT + 1 + BOLT_TOP.unsigned_abs()),
    )
}

/// Draw the indicator with the bar's top-left corner at `origin`.
pub fn draw_battery<D>(
    target: &mut D,
    state: &BatteryState,
    origin: Point,
    theme: &Theme,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let color = bar_color(state.percent, theme);

    if state.percent == 0 {
        draw_empty_cross(target, origin, color)?;
    } else {
        Rectangle::new(origin, Size::new(bar_width(state.percent), BAR_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)?;
    }

    let outline = PrimitiveStyleBuilder::new()
        .stroke_color(theme.outline)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    Rectangle::new(
        origin - Point::new(1, 1),
        Size::new(BAR_MAX_WIDTH + 2, BAR_HEIGHT + 2),
    )
    .into_styled(outline)
    .draw(target)?;

    if state.charging {
        draw_charging_bolt(target, origin, theme.charging)?;
    }

    Ok(())
}

fn draw_empty_cross<D>(target: &mut D, origin: Point, color: ColorMode) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let right = BAR_MAX_WIDTH as i32 - 1;
    let bottom = BAR_HEIGHT as i32 - 1;
    let style = PrimitiveStyle::with_stroke(color, 1);

    Line::new(origin, origin + Point::new(right, bottom))
        .into_styled(style)
        .draw(target)?;
    Line::new(origin + Point::new(0, bottom), origin + Point::new(right, 0))
        .into_styled(style)
        .draw(target)
}

fn draw_charging_bolt<D>(target: &mut D, origin: Point, color: ColorMode) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    for ((x, y0), y1) in BOLT_X.iter().zip(BOLT_Y_START).zip(BOLT_Y_END) {
        Line::new(origin + Point::new(*x, y0), origin + Point::new(*x, y1))
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

//! Element placement for round and rectangular displays

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};

/// Display form factor, fixed per device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShapeVariant {
    Round,
    Rectangular,
}

/// Battery bar width at 100 %
pub const BAR_MAX_WIDTH: u32 = 64;
/// Battery bar height
pub const BAR_HEIGHT: u32 = 6;

const TIME_HEIGHT: u32 = 48;
const DATE_HEIGHT: u32 = 28;
const SPRITE_HEIGHT: u32 = 64;
const BT_ICON_SIZE: u32 = 30;

/// Offsets added to the rectangular baseline of each element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConstants {
    pub time: Point,
    pub date: Point,
    pub sprite: Point,
    pub battery: Point,
    pub bt_icon: Point,
}

/// Rectangles of all positioned elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frames {
    pub time: Rectangle,
    pub date: Rectangle,
    pub sprite: Rectangle,
    /// Area of a full battery bar; the outline sits one pixel outside
    pub battery: Rectangle,
    pub bt_icon: Rectangle,
}

/// Layout offsets for the given display shape
pub fn layout_for(shape: ShapeVariant) -> LayoutConstants {
    match shape {
        ShapeVariant::Round => LayoutConstants {
            time: Point::new(0, 30),
            date: Point::new(0, 24),
            sprite: Point::new(44, 4),
            battery: Point::new(-18, -104),
            bt_icon: Point::new(36, -14),
        },
        ShapeVariant::Rectangular => LayoutConstants {
            time: Point::zero(),
            date: Point::zero(),
            sprite: Point::zero(),
            battery: Point::zero(),
            bt_icon: Point::zero(),
        },
    }
}

impl LayoutConstants {
    /// Place every element inside `bounds`.
    pub fn frames(&self, bounds: &Rectangle) -> Frames {
        let origin = bounds.top_left;
        let w = bounds.size.width;
        let h = bounds.size.height as i32;

        Frames {
            time: Rectangle::new(
                origin + Point::new(2, 0) + self.time,
                Size::new(w, TIME_HEIGHT),
            ),
            date: Rectangle::new(
                origin + Point::new(3, 44) + self.date,
                Size::new(w, DATE_HEIGHT),
            ),
            sprite: Rectangle::new(
                origin + Point::new(0, 104) + self.sprite,
                Size::new(w / 2, SPRITE_HEIGHT),
            ),
            battery: Rectangle::new(
                origin + Point::new(75, h * 675 / 1000) + self.battery,
                Size::new(BAR_MAX_WIDTH, BAR_HEIGHT),
            ),
            bt_icon: Rectangle::new(
                origin + Point::new(90, h * 725 / 1000) + self.bt_icon,
                Size::new(BT_ICON_SIZE, BT_ICON_SIZE),
            ),
        }
    }
}

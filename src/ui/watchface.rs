//! Default watchface

use chrono::NaiveDateTime;
use embedded_graphics::{
    draw_target::DrawTargetExt,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use super::{
    assets::Assets,
    battery::{battery_area, draw_battery},
    clock::{ClockStyle, Label, DATE_LEN, TIME_LEN},
    connectivity::ConnectivityIndicator,
    layout::layout_for,
    theme::Theme,
    ColorMode,
};
use crate::{
    app::EventHandler,
    config::WatchfaceConfig,
    host::Host,
    state::{AppState, BatteryState},
    tick::TimeUnits,
};

/// Parts of the face that can request a repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Layer {
    Background = 1 << 0,
    Time = 1 << 1,
    Date = 1 << 2,
    Battery = 1 << 3,
    Bluetooth = 1 << 4,
}

/// Time, date, battery bar and Bluetooth icon on one screen
pub struct Watchface {
    state: AppState,
    assets: Assets,
    time_label: Label<TIME_LEN>,
    date_label: Label<DATE_LEN>,
    bluetooth: ConnectivityIndicator,
    /// Layers marked since the last redraw
    dirty: u8,
}

impl Watchface {
    /// Build the face for `bounds` and paint the current host state into it.
    pub fn load<H: Host>(
        bounds: Rectangle,
        config: WatchfaceConfig,
        assets: Assets,
        host: &mut H,
    ) -> Self {
        let frames = layout_for(config.shape).frames(&bounds);
        info!("Loading watchface ({}x{})", bounds.size.width, bounds.size.height);

        let mut face = Self {
            state: AppState {
                bounds,
                battery: BatteryState::default(),
                connected: true,
                frames,
                theme: Theme::for_palette(config.palette),
            },
            assets,
            time_label: Label::new(frames.time),
            date_label: Label::new(frames.date),
            bluetooth: ConnectivityIndicator::new(frames.bt_icon),
            dirty: 0,
        };
        face.mark_dirty(Layer::Background);

        // Ensure battery level is displayed from the start
        face.on_battery_change(host.peek_battery());
        // Show the correct state of the connection from the start
        let connected = host.peek_connection();
        face.on_connectivity_change(host, connected);

        let now = host.now();
        let style = ClockStyle::from_24h_flag(host.is_24h_style());
        face.update_time(&now, style);
        face.update_date(&now);

        face
    }

    /// Release the face and everything it loaded.
    pub fn unload(self) {
        info!("Unloading watchface");
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn time_text(&self) -> &str {
        self.time_label.text()
    }

    pub fn date_text(&self) -> &str {
        self.date_label.text()
    }

    pub fn is_bt_icon_visible(&self) -> bool {
        !self.bluetooth.is_hidden()
    }

    /// Request a repaint of `layer` in the next redraw pass.
    pub fn mark_dirty(&mut self, layer: Layer) {
        self.dirty |= layer as u8;
    }

    pub fn is_dirty(&self, layer: Layer) -> bool {
        self.dirty & layer as u8 != 0
    }

    /// Write the current time into the time label.
    pub fn update_time(&mut self, now: &NaiveDateTime, style: ClockStyle) {
        if self.time_label.set_time(now, style) {
            self.mark_dirty(Layer::Time);
        }
    }

    /// Write the current date into the date label.
    pub fn update_date(&mut self, now: &NaiveDateTime) {
        if self.date_label.set_date(&now.date()) {
            self.mark_dirty(Layer::Date);
        }
    }

    /// Redraw pass.
    ///
    /// Repaints each layer marked since the last pass once, no matter how
    /// often it was marked, and leaves the pixels outside those layers alone.
    /// A marked background repaints the whole face. Returns whether anything
    /// was drawn. On a draw error the marks are kept so the next pass retries.
    pub fn render<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if self.dirty == 0 {
            return Ok(false);
        }
        trace!("Redraw, dirty layers {=u8:b}", self.dirty);

        if self.is_dirty(Layer::Background) {
            self.draw_layers(target)?;
        } else {
            for layer in [Layer::Time, Layer::Date, Layer::Battery, Layer::Bluetooth] {
                if self.is_dirty(layer) {
                    let area = self.layer_area(layer);
                    self.draw_layers(&mut target.clipped(&area))?;
                }
            }
        }

        self.dirty = 0;
        Ok(true)
    }

    /// Screen area owned by `layer`
    fn layer_area(&self, layer: Layer) -> Rectangle {
        let frames = &self.state.frames;
        match layer {
            Layer::Background => self.state.bounds,
            Layer::Time => frames.time,
            Layer::Date => frames.date,
            Layer::Battery => battery_area(frames.battery.top_left),
            Layer::Bluetooth => frames.bt_icon,
        }
    }

    /// Paint every layer bottom to top; the target decides what is kept.
    fn draw_layers<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let theme = self.state.theme;
        let frames = self.state.frames;

        self.state
            .bounds
            .into_styled(PrimitiveStyle::with_fill(theme.background))
            .draw(target)?;
        if let Some(sprite) = &self.assets.background {
            sprite.draw(target, frames.sprite.top_left, theme.text)?;
        }
        self.time_label.draw(target, self.assets.time_font, &theme)?;
        self.date_label.draw(target, self.assets.text_font, &theme)?;
        self.bluetooth.draw(target, self.assets.bt_icon.as_ref(), &theme)?;
        draw_battery(target, &self.state.battery, frames.battery.top_left, &theme)
    }
}

impl EventHandler for Watchface {
    fn on_tick<H: Host>(&mut self, host: &mut H, now: NaiveDateTime, units: TimeUnits) {
        if units.contains(TimeUnits::MINUTE) {
            // Preference is read on every tick
            let style = ClockStyle::from_24h_flag(host.is_24h_style());
            self.update_time(&now, style);
        }
        if units.contains(TimeUnits::DAY) {
            self.update_date(&now);
        }
    }

    fn on_battery_change(&mut self, state: BatteryState) {
        debug!("Battery at {}% (charging: {})", state.percent, state.charging);
        // Record the new battery level
        self.state.battery = BatteryState::new(state.percent, state.charging);
        self.mark_dirty(Layer::Battery);
    }

    fn on_connectivity_change<H: Host>(&mut self, host: &mut H, connected: bool) {
        info!("Phone {}", if connected { "connected" } else { "disconnected" });
        self.state.connected = connected;
        if self.bluetooth.update(connected, host) {
            self.mark_dirty(Layer::Bluetooth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{dispatch, Event},
        config::Palette,
        host::mock::{at, MockHost},
        ui::{layout::ShapeVariant, testing::Framebuffer, theme},
    };

    fn screen() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(240, 240))
    }

    fn load(host: &mut MockHost) -> Watchface {
        Watchface::load(screen(), WatchfaceConfig::DEFAULT, Assets::builtin(), host)
    }

    #[test]
    fn test_load_paints_initial_state() {
        let mut host = MockHost::new();
        host.battery = BatteryState::new(64, true);
        let face = load(&mut host);

        assert_eq!(face.state().battery, BatteryState::new(64, true));
        assert!(face.state().connected);
        assert!(!face.is_bt_icon_visible());
        assert_eq!(face.time_text(), "13:05");
        assert_eq!(face.date_text(), "Mon Jan 02");
        assert!(face.is_dirty(Layer::Background));
        assert!(face.is_dirty(Layer::Battery));
        assert_eq!(host.pulses, 0);
    }

    #[test]
    fn test_load_while_disconnected_alerts() {
        let mut host = MockHost::new();
        host.connected = false;
        let face = load(&mut host);
        assert!(face.is_bt_icon_visible());
        assert_eq!(host.pulses, 1);
    }

    #[test]
    fn test_render_coalesces_marks() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);

        assert_eq!(face.render(&mut fb), Ok(true));
        assert_eq!(face.render(&mut fb), Ok(false));

        for percent in [90, 30, 0, 100] {
            let state = BatteryState::new(percent, false);
            dispatch(&mut face, &mut host, Event::BatteryChanged(state));
        }
        assert_eq!(face.render(&mut fb), Ok(true));
        assert_eq!(face.render(&mut fb), Ok(false));
        assert_eq!(face.state().battery.percent, 100);
    }

    #[test]
    fn test_render_places_battery_bar() {
        let mut host = MockHost::new();
        host.battery = BatteryState::new(80, false);
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        // 240 * 0.675 = 162
        let theme = Theme::COLOR;
        assert_eq!(fb.get(75, 162), Some(theme.full));
        assert_eq!(fb.get(74, 161), Some(theme.outline));
        // 80 * 64 / 100 = 51 px
        assert_eq!(fb.get(75 + 50, 167), Some(theme.full));
        assert_eq!(fb.get(75 + 51, 162), Some(theme.background));
    }

    #[test]
    fn test_battery_drop_recolors_bar() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        face.on_battery_change(BatteryState::new(20, false));
        face.render(&mut fb).unwrap();
        assert_eq!(fb.get(75, 162), Some(theme::RED));
        // The old, longer bar is painted over
        assert_eq!(fb.get(75 + 40, 162), Some(theme::OXFORD_BLUE));
    }

    #[test]
    fn test_battery_change_repaints_only_the_battery() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();
        assert_eq!(fb.drawn(), 240 * 240);

        fb.clear();
        face.on_battery_change(BatteryState::new(20, true));
        assert_eq!(face.render(&mut fb), Ok(true));

        let area = battery_area(face.state().frames.battery.top_left);
        assert_eq!(fb.drawn(), (area.size.width * area.size.height) as usize);
        assert_eq!(fb.get(75, 162), Some(theme::RED));
        assert_eq!(fb.get(0, 0), None);
        assert_eq!(fb.get(120, 20), None);
    }

    #[test]
    fn test_time_and_battery_marks_repaint_both_areas() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        fb.clear();
        face.on_tick(&mut host, at(2006, 1, 2, 13, 6), TimeUnits::MINUTE);
        face.on_battery_change(BatteryState::new(50, false));
        face.render(&mut fb).unwrap();

        let time = face.state().frames.time.intersection(&screen());
        let area = battery_area(face.state().frames.battery.top_left);
        let expected = time.size.width * time.size.height + area.size.width * area.size.height;
        assert_eq!(fb.drawn(), expected as usize);
        assert_eq!(fb.get(0, 239), None);
    }

    #[test]
    fn test_link_flap_in_one_pass_alerts_once() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        // Lost and regained before the next redraw
        for connected in [false, true] {
            dispatch(&mut face, &mut host, Event::ConnectivityChanged(connected));
        }
        assert_eq!(host.pulses, 1);
        assert!(!face.is_bt_icon_visible());
        face.render(&mut fb).unwrap();
        let icon = face.state().frames.bt_icon;
        assert_eq!(
            fb.count_in_rows(Theme::COLOR.text, icon.top_left.y..icon.top_left.y + 30),
            0
        );
    }

    #[test]
    fn test_link_changes() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        dispatch(&mut face, &mut host, Event::ConnectivityChanged(false));
        assert_eq!(host.pulses, 1);
        assert!(face.is_bt_icon_visible());
        assert!(face.is_dirty(Layer::Bluetooth));
        face.render(&mut fb).unwrap();
        let icon = face.state().frames.bt_icon;
        assert!(fb.count_in_rows(Theme::COLOR.text, icon.top_left.y..icon.top_left.y + 30) > 0);

        dispatch(&mut face, &mut host, Event::ConnectivityChanged(true));
        assert_eq!(host.pulses, 1);
        assert!(!face.is_bt_icon_visible());
        face.render(&mut fb).unwrap();
        assert_eq!(
            fb.count_in_rows(Theme::COLOR.text, icon.top_left.y..icon.top_left.y + 30),
            0
        );
    }

    #[test]
    fn test_minute_tick_updates_time_only() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        face.on_tick(&mut host, at(2006, 1, 3, 13, 6), TimeUnits::MINUTE);
        assert_eq!(face.time_text(), "13:06");
        assert_eq!(face.date_text(), "Mon Jan 02");
        assert!(face.is_dirty(Layer::Time));
        assert!(!face.is_dirty(Layer::Date));
    }

    #[test]
    fn test_day_tick_updates_date() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        face.on_tick(&mut host, at(2006, 1, 3, 0, 0), TimeUnits::DAY | TimeUnits::MINUTE);
        assert_eq!(face.date_text(), "Tue Jan 03");
        assert_eq!(face.time_text(), "00:00");
    }

    #[test]
    fn test_clock_preference_is_read_each_tick() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        assert_eq!(face.time_text(), "13:05");

        host.clock_24h = false;
        face.on_tick(&mut host, at(2006, 1, 2, 13, 6), TimeUnits::MINUTE);
        assert_eq!(face.time_text(), "01:06");
    }

    #[test]
    fn test_unchanged_time_does_not_mark() {
        let mut host = MockHost::new();
        let mut face = load(&mut host);
        let mut fb = Framebuffer::new(240, 240);
        face.render(&mut fb).unwrap();

        face.on_tick(&mut host, at(2006, 1, 2, 13, 5), TimeUnits::MINUTE);
        assert_eq!(face.render(&mut fb), Ok(false));
    }

    #[test]
    fn test_round_layout() {
        let mut host = MockHost::new();
        let config = WatchfaceConfig {
            shape: ShapeVariant::Round,
            palette: Palette::Monochrome,
        };
        let bounds = Rectangle::new(Point::zero(), Size::new(180, 180));
        let mut face = Watchface::load(bounds, config, Assets::builtin(), &mut host);
        let mut fb = Framebuffer::new(180, 180);
        face.render(&mut fb).unwrap();

        // 180 * 0.675 - 104 = 17, 75 - 18 = 57
        assert_eq!(face.state().frames.battery.top_left, Point::new(57, 17));
        assert_eq!(fb.get(57, 17), Some(Theme::MONOCHROME.full));
        assert_eq!(fb.get(0, 179), Some(Theme::MONOCHROME.background));
    }

    #[test]
    fn test_unload() {
        let mut host = MockHost::new();
        let face = load(&mut host);
        face.unload();
    }
}

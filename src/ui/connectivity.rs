//! Bluetooth connection indicator

use embedded_graphics::{prelude::*, primitives::Rectangle};

use super::{assets::Bitmap, theme::Theme, ColorMode};
use crate::host::Host;

/// Icon shown while the phone is disconnected
pub struct ConnectivityIndicator {
    frame: Rectangle,
    hidden: bool,
}

impl ConnectivityIndicator {
    /// Create a hidden indicator
    pub fn new(frame: Rectangle) -> Self {
        Self { frame, hidden: true }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Apply a link state reported by the host.
    ///
    /// The icon is hidden while connected. Every report of a lost link
    /// fires one double pulse; the host only reports changes.
    /// Returns whether the visibility changed.
    pub fn update<H: Host>(&mut self, connected: bool, host: &mut H) -> bool {
        let changed = self.hidden != connected;
        self.hidden = connected;

        if !connected {
            debug!("Link lost, issuing vibration alert");
            host.double_pulse();
        }

        changed
    }

    /// Draw the icon centered in its frame unless hidden.
    pub fn draw<D>(
        &self,
        target: &mut D,
        icon: Option<&Bitmap<'_>>,
        theme: &Theme,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if self.hidden {
            return Ok(());
        }
        match icon {
            Some(icon) => {
                let size = icon.size();
                let offset = Point::new(
                    (self.frame.size.width as i32 - size.width as i32) / 2,
                    (self.frame.size.height as i32 - size.height as i32) / 2,
                );
                icon.draw(target, self.frame.top_left + offset, theme.text)
            }
            None => Ok(()),
        }
    }
}

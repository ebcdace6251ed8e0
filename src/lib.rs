//! PineTime watchface
//!
//! Renders the time, the date, a battery bar and a Bluetooth indicator, and
//! re-renders on minute/day ticks, battery changes and link changes.
//!
//! Everything in this library is hardware independent and runs on the host:
//! ```bash
//! cargo test --lib
//! ```
//! The firmware binary (`src/main.rs`, `--features firmware`) binds the
//! [`host::Host`] services to the nRF52832 peripherals.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

// This must come first so the macros are visible to the other modules
pub(crate) mod fmt;

pub mod app;
pub mod config;
pub mod host;
pub mod state;
pub mod tick;
pub mod ui;

pub use app::{dispatch, Event, EventHandler};
pub use config::{Palette, WatchfaceConfig};
pub use host::Host;
pub use state::{AppState, BatteryState};
pub use tick::{TickTimer, TimeUnits};
pub use ui::{layout::ShapeVariant, Watchface};

//! Host event routing

use chrono::NaiveDateTime;

use crate::{host::Host, state::BatteryState, tick::TimeUnits};

/// Notification delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Wall-clock units changed
    Tick(NaiveDateTime, TimeUnits),
    /// Battery level or charger state changed
    BatteryChanged(BatteryState),
    /// Phone link came up or went down
    ConnectivityChanged(bool),
}

/// Receiver of host notifications.
///
/// Callbacks run to completion one at a time.
pub trait EventHandler {
    fn on_tick<H: Host>(&mut self, host: &mut H, now: NaiveDateTime, units: TimeUnits);
    fn on_battery_change(&mut self, state: BatteryState);
    fn on_connectivity_change<H: Host>(&mut self, host: &mut H, connected: bool);
}

/// Deliver `event` to the matching callback of `handler`.
pub fn dispatch<E: EventHandler, H: Host>(handler: &mut E, host: &mut H, event: Event) {
    match event {
        Event::Tick(now, units) => {
            if !units.is_empty() {
                handler.on_tick(host, now, units);
            }
        }
        Event::BatteryChanged(state) => handler.on_battery_change(state),
        Event::ConnectivityChanged(connected) => handler.on_connectivity_change(host, connected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::{at, MockHost};

    #[derive(Default)]
    struct Recorder {
        ticks: Vec<TimeUnits>,
        battery: Vec<BatteryState>,
        links: Vec<bool>,
    }

    impl EventHandler for Recorder {
        fn on_tick<H: Host>(&mut self, _host: &mut H, _now: NaiveDateTime, units: TimeUnits) {
            self.ticks.push(units);
        }

        fn on_battery_change(&mut self, state: BatteryState) {
            self.battery.push(state);
        }

        fn on_connectivity_change<H: Host>(&mut self, _host: &mut H, connected: bool) {
            self.links.push(connected);
        }
    }

    #[test]
    fn test_events_reach_their_callback() {
        let mut host = MockHost::new();
        let mut rec = Recorder::default();

        dispatch(&mut rec, &mut host, Event::Tick(at(2024, 1, 1, 0, 1), TimeUnits::MINUTE));
        dispatch(&mut rec, &mut host, Event::BatteryChanged(BatteryState::new(12, true)));
        dispatch(&mut rec, &mut host, Event::ConnectivityChanged(false));

        assert_eq!(rec.ticks, vec![TimeUnits::MINUTE]);
        assert_eq!(rec.battery, vec![BatteryState::new(12, true)]);
        assert_eq!(rec.links, vec![false]);
    }

    #[test]
    fn test_empty_tick_is_dropped() {
        let mut host = MockHost::new();
        let mut rec = Recorder::default();
        dispatch(&mut rec, &mut host, Event::Tick(at(2024, 1, 1, 0, 1), TimeUnits::NONE));
        assert!(rec.ticks.is_empty());
    }
}

//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::Instant;

/// Wall-clock time derived from a known UTC instant and the uptime since then
pub struct TimeManager {
    /// UTC seconds at `instant`
    epoch: i64,
    /// Related system time
    instant: Instant,
    /// Local time offset from UTC
    utc_offset: i32,
}

impl TimeManager {
    /// Start counting from `epoch` (UTC seconds) now
    pub fn init(epoch: i64, utc_offset: i32) -> Self {
        Self {
            epoch,
            instant: Instant::now(),
            utc_offset,
        }
    }

    /// Current local time
    pub fn now(&self) -> NaiveDateTime {
        let secs =
            self.epoch + i64::from(self.utc_offset) + self.instant.elapsed().as_secs() as i64;
        NaiveDateTime::from_timestamp_opt(secs, 0).unwrap_or_default()
    }
}

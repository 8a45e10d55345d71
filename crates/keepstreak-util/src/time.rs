//! Time utilities for keepstreak
//!
//! Calendar-day arithmetic for streak decisions and wall-clock windows for
//! schedules. Every day-boundary question is answered in the local timezone
//! of the machine evaluating it, never by fixed 24 hour offsets.
//!
//! # Moving the clock
//!
//! Debug builds start the clock at `KEEPSTREAK_MOCK_TIME` (local
//! `YYYY-MM-DD HH:MM:SS`) and let it run from there, so a streak can be
//! walked across several days without waiting for midnight.
//!
//! Example:
//! ```bash
//! KEEPSTREAK_MOCK_TIME="2025-12-25 14:30:00" keepstreak check-in
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use crate::KeepstreakError;

/// Debug builds read this to shift the clock, e.g. `2025-12-25 14:30:00`
pub const MOCK_TIME_ENV_VAR: &str = "KEEPSTREAK_MOCK_TIME";

const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Offset between the mocked and the real clock, fixed on first use so the
/// mocked clock keeps ticking.
static CLOCK_SHIFT: OnceLock<Option<chrono::Duration>> = OnceLock::new();

/// Parse a mock time value as a local date and time
pub fn parse_mock_time(value: &str) -> crate::Result<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), MOCK_TIME_FORMAT)
        .map_err(|_| KeepstreakError::invalid_time(value, "Expected YYYY-MM-DD HH:MM:SS"))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| KeepstreakError::invalid_time(value, "Does not exist in the local timezone"))
}

#[allow(clippy::disallowed_methods)] // the one place that reads the real clock
fn clock_shift() -> Option<chrono::Duration> {
    *CLOCK_SHIFT.get_or_init(|| {
        if !cfg!(debug_assertions) {
            return None;
        }

        let value = std::env::var(MOCK_TIME_ENV_VAR).ok()?;
        match parse_mock_time(&value) {
            Ok(mocked) => {
                let shift = mocked.signed_duration_since(chrono::Local::now());
                tracing::info!(mock_time = %value, shift_secs = shift.num_seconds(), "Mock time enabled");
                Some(shift)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring {}", MOCK_TIME_ENV_VAR);
                None
            }
        }
    })
}

/// Whether `now()` is running on a mocked clock
pub fn is_mock_time_active() -> bool {
    clock_shift().is_some()
}

/// The current local time.
///
/// Debug builds honor [`MOCK_TIME_ENV_VAR`]; release builds always use the
/// system clock.
#[allow(clippy::disallowed_methods)]
pub fn now() -> DateTime<Local> {
    let real = chrono::Local::now();
    clock_shift().map_or(real, |shift| real + shift)
}

/// The local calendar day an instant falls on.
pub fn calendar_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    calendar_day_in(instant, &Local)
}

/// The calendar day an instant falls on in `zone`.
pub fn calendar_day_in<Tz: TimeZone, Z: TimeZone>(instant: &DateTime<Tz>, zone: &Z) -> NaiveDate {
    instant.with_timezone(zone).date_naive()
}

/// True iff both instants fall on the same local calendar day.
pub fn is_same_calendar_day<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> bool {
    calendar_day(a) == calendar_day(b)
}

/// True iff `instant`'s local day is the calendar day immediately before
/// `reference`'s local day.
///
/// Uses date decrement, so month and year rollover and DST days of 23 or 25
/// hours are all handled.
pub fn is_yesterday<A: TimeZone, B: TimeZone>(instant: &DateTime<A>, reference: &DateTime<B>) -> bool {
    is_yesterday_in(instant, reference, &Local)
}

/// [`is_yesterday`] with the days taken in `zone`
pub fn is_yesterday_in<A: TimeZone, B: TimeZone, Z: TimeZone>(
    instant: &DateTime<A>,
    reference: &DateTime<B>,
    zone: &Z,
) -> bool {
    calendar_day_in(reference, zone)
        .pred_opt()
        .is_some_and(|yesterday| calendar_day_in(instant, zone) == yesterday)
}

/// True iff `instant` falls on the current local calendar day.
pub fn is_today<Tz: TimeZone>(instant: &DateTime<Tz>) -> bool {
    is_same_calendar_day(instant, &now())
}

/// Format an instant as a short human date, e.g. `Jan 1, 2025`.
pub fn format_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Local)
        .format("%b %-d, %Y")
        .to_string()
}

/// Whole 24 hour periods between two instants, regardless of order.
pub fn days_between<A: TimeZone, B: TimeZone>(start: &DateTime<A>, end: &DateTime<B>) -> i64 {
    let diff = end.timestamp_millis() - start.timestamp_millis();
    diff.abs() / MILLIS_PER_DAY
}

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock time of day, minute precision.
///
/// Serialized as an `HH:MM` string. Field order makes the derived ordering
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
}

impl WallClock {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn minute_of_day(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let time = instant.time();
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for WallClock {
    type Err = KeepstreakError;

    /// Parse `HH:MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| KeepstreakError::invalid_time(s, "Expected HH:MM between 00:00 and 23:59"))?;
        Ok(Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        })
    }
}

impl TryFrom<String> for WallClock {
    type Error = KeepstreakError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WallClock> for String {
    fn from(value: WallClock) -> Self {
        value.to_string()
    }
}

/// A daily window between two wall-clock times. The start is inclusive and
/// the end exclusive; a start later than the end wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: WallClock,
    pub end: WallClock,
}

impl TimeWindow {
    pub fn new(start: WallClock, end: WallClock) -> Self {
        Self { start, end }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, dt: &DateTime<Local>) -> bool {
        let at = WallClock::of(dt);
        match self.crosses_midnight() {
            true => at >= self.start || at < self.end,
            false => self.start <= at && at < self.end,
        }
    }

    /// Time until the window closes, or `None` outside it
    pub fn remaining_duration(&self, dt: &DateTime<Local>) -> Option<Duration> {
        if !self.contains(dt) {
            return None;
        }

        let elapsed_secs = dt.time().num_seconds_from_midnight();
        let end_secs = self.end.minute_of_day() * 60;
        let end_secs = if end_secs <= elapsed_secs {
            end_secs + MINUTES_PER_DAY * 60
        } else {
            end_secs
        };

        Some(Duration::from_secs(u64::from(end_secs - elapsed_secs)))
    }
}

/// Short human form of a duration: `7h 30m`, `12m 5s` or `40s`
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 3600, secs % 3600 / 60, secs % 60) {
        (0, 0, s) => format!("{}s", s),
        (0, m, s) => format!("{}m {}s", m, s),
        (h, m, _) => format!("{}h {}m", h, m),
    }
}

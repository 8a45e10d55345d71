//! Day continuity and streak state classification

use chrono::{DateTime, TimeZone, Utc};
use keepstreak_api::{StreakData, StreakState};
use keepstreak_util::{is_same_calendar_day, is_yesterday};
use serde::{Deserialize, Serialize};

/// How a check-in at some instant relates to the last recorded one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayContinuity {
    /// Already checked in on this calendar day
    AlreadyToday,
    /// Last check-in was on the previous calendar day
    ContinuesYesterday,
    /// Never checked in, or at least one calendar day was skipped
    Gap,
}

impl DayContinuity {
    /// Classify `now` against the last check-in, by local calendar day
    pub fn classify<Tz: TimeZone>(last_check_in: Option<&DateTime<Utc>>, now: &DateTime<Tz>) -> Self {
        match last_check_in {
            Some(last) if is_same_calendar_day(last, now) => DayContinuity::AlreadyToday,
            Some(last) if is_yesterday(last, now) => DayContinuity::ContinuesYesterday,
            _ => DayContinuity::Gap,
        }
    }
}

/// Derive the streak state of `data` as seen at `now`
pub fn streak_state<Tz: TimeZone>(data: &StreakData, now: &DateTime<Tz>) -> StreakState {
    if data.current_streak == 0 {
        return StreakState::Fresh;
    }

    match DayContinuity::classify(data.last_check_in.as_ref(), now) {
        DayContinuity::AlreadyToday | DayContinuity::ContinuesYesterday => StreakState::Active,
        DayContinuity::Gap if data.last_check_in.is_none() => StreakState::Fresh,
        DayContinuity::Gap => StreakState::Broken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn at(m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap()
    }

    fn utc(dt: DateTime<Local>) -> DateTime<Utc> {
        dt.with_timezone(&Utc)
    }

    #[test]
    fn test_classify_never() {
        assert_eq!(DayContinuity::classify(None, &at(6, 1, 9)), DayContinuity::Gap);
    }

    #[test]
    fn test_classify_same_day() {
        let last = utc(at(6, 1, 0));
        assert_eq!(
            DayContinuity::classify(Some(&last), &at(6, 1, 23)),
            DayContinuity::AlreadyToday
        );
    }

    #[test]
    fn test_classify_yesterday_and_gap() {
        let last = utc(at(6, 1, 23));
        assert_eq!(
            DayContinuity::classify(Some(&last), &at(6, 2, 0)),
            DayContinuity::ContinuesYesterday
        );
        assert_eq!(DayContinuity::classify(Some(&last), &at(6, 3, 0)), DayContinuity::Gap);
    }

    #[test]
    fn test_classify_across_month_end() {
        let last = utc(at(1, 31, 20));
        assert_eq!(
            DayContinuity::classify(Some(&last), &at(2, 1, 7)),
            DayContinuity::ContinuesYesterday
        );
    }

    #[test]
    fn test_classify_clock_moved_back() {
        // Last check-in is in the future relative to now
        let last = utc(at(6, 5, 12));
        assert_eq!(DayContinuity::classify(Some(&last), &at(6, 4, 12)), DayContinuity::Gap);
    }

    #[test]
    fn test_streak_state() {
        let mut data = StreakData::new(utc(at(6, 1, 8)));
        assert_eq!(streak_state(&data, &at(6, 1, 9)), StreakState::Fresh);

        data.current_streak = 3;
        data.last_check_in = Some(utc(at(6, 3, 8)));
        assert_eq!(streak_state(&data, &at(6, 3, 20)), StreakState::Active);
        assert_eq!(streak_state(&data, &at(6, 4, 20)), StreakState::Active);
        assert_eq!(streak_state(&data, &at(6, 5, 20)), StreakState::Broken);

        data.current_streak = 0;
        data.last_check_in = None;
        assert_eq!(streak_state(&data, &at(6, 5, 20)), StreakState::Fresh);
    }
}

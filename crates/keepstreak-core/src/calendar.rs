//! Month calendar of check-in history

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use keepstreak_api::StreakData;
use keepstreak_util::{calendar_day, format_date};
use serde::Serialize;

/// Weekday column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One cell of the grid. Leading padding cells have no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: Option<NaiveDate>,
    pub checked_in: bool,
    pub is_today: bool,
}

impl CalendarCell {
    pub fn day(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }
}

/// The month containing `today`, laid out Sunday-first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthCalendar {
    pub fn build(today: NaiveDate, history: &[DateTime<Utc>]) -> Self {
        let first = today - Duration::days(today.day0() as i64);
        let checked_days: Vec<NaiveDate> = history.iter().map(calendar_day).collect();

        let padding = first.weekday().num_days_from_sunday() as usize;
        let mut cells = vec![
            CalendarCell {
                date: None,
                checked_in: false,
                is_today: false,
            };
            padding
        ];

        cells.extend(
            first
                .iter_days()
                .take_while(|d| d.month() == today.month())
                .map(|date| CalendarCell {
                    date: Some(date),
                    checked_in: checked_days.contains(&date),
                    is_today: date == today,
                }),
        );

        Self {
            year: today.year(),
            month: today.month(),
            cells,
        }
    }

    /// e.g. `March 2025`
    pub fn title(&self) -> String {
        self.cells
            .iter()
            .find_map(|c| c.date)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// Cells in rows of seven; the last row may be short
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn checked_in_count(&self) -> usize {
        self.cells.iter().filter(|c| c.checked_in).count()
    }
}

/// Start date and last check-in lines, once there is any history
pub fn calendar_summary(data: &StreakData) -> Option<(String, String)> {
    if data.history.is_empty() {
        return None;
    }

    let started = format_date(&data.start_date);
    let last = data
        .last_check_in
        .as_ref()
        .map(format_date)
        .unwrap_or_else(|| "None".into());

    Some((started, last))
}

//! Terminal rendering

use chrono::{DateTime, Utc};
use keepstreak_api::{
    Event, EventPayload, FocusModeState, MilestoneInfo, MotivationState, StreakData, StreakState,
    StreakView,
};
use keepstreak_core::{
    COPING_STRATEGIES, CheckInOutcome, DayContinuity, EMERGENCY_HEADLINE, EMERGENCY_REMINDER,
    MonthCalendar, WEEKDAY_HEADERS, calendar_summary, milestone_progress,
};
use keepstreak_util::{days_between, format_date};
use serde::Serialize;
use std::time::Duration;

const PROGRESS_WIDTH: usize = 20;

/// Machine-readable status
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub state: StreakState,
    pub start_date: DateTime<Utc>,
    #[serde(flatten)]
    pub view: StreakView,
}

fn days(n: u32) -> String {
    if n == 1 { "1 day".into() } else { format!("{} days", n) }
}

fn last_check_in_label(last: Option<&DateTime<Utc>>) -> String {
    last.map(format_date).unwrap_or_else(|| "Never".into())
}

pub fn check_in(outcome: &CheckInOutcome, data: &StreakData) {
    match outcome {
        CheckInOutcome::AlreadyCheckedIn => {
            println!("Already checked in today. Current streak: {}", days(data.current_streak));
        }
        CheckInOutcome::Recorded {
            continuity,
            current_streak,
            ..
        } => {
            match continuity {
                DayContinuity::ContinuesYesterday => println!("✓ Checked in! Streak continues."),
                _ if data.total_check_ins == 1 => println!("✓ Checked in! Your journey begins."),
                _ => println!("✓ Checked in! A new streak starts today."),
            }
            println!("  Current streak: {}", days(*current_streak));
            println!("  Longest streak: {}", days(data.longest_streak));
        }
    }
}

pub fn celebration(milestone: &MilestoneInfo) {
    println!();
    println!("🏆 {}", milestone.title);
    println!("   {}", milestone.description);
    println!("   {} Days · Continue your journey!", milestone.days);
}

pub fn status(view: &StreakView, state: StreakState, started: &DateTime<Utc>, encouragement: &str) {
    let state_label = match state {
        StreakState::Fresh => "not started",
        StreakState::Active => "active",
        StreakState::Broken => "broken, check in to start again",
    };

    println!("Current streak: {} ({})", days(view.current_streak), state_label);
    println!("Longest streak: {}", days(view.longest_streak));
    println!("Total check-ins: {}", view.total_check_ins);
    println!("Last check-in:  {}", last_check_in_label(view.last_check_in.as_ref()));
    println!(
        "Tracking since {} ({})",
        format_date(started),
        days(days_between(started, &keepstreak_util::now()) as u32)
    );
    println!();
    println!("{}", encouragement);
}

fn progress_bar(percent: u8) -> String {
    let filled = PROGRESS_WIDTH * percent as usize / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(PROGRESS_WIDTH - filled))
}

pub fn milestones(milestones: &[MilestoneInfo], current_streak: u32) {
    println!("Milestones");
    for milestone in milestones {
        let detail = if milestone.achieved {
            "Achieved!".to_string()
        } else {
            format!("{}/{} days", current_streak.min(milestone.days), milestone.days)
        };
        let percent = if milestone.achieved {
            100
        } else {
            milestone_progress(milestone.days, current_streak)
        };
        println!(
            "  {} {:<8} {} {}",
            if milestone.achieved { "★" } else { "☆" },
            milestone.title,
            progress_bar(percent),
            detail
        );
    }
}

pub fn calendar(calendar: &MonthCalendar, data: &StreakData) {
    println!("{}", calendar.title());
    println!("{}", WEEKDAY_HEADERS.map(|h| format!("{:>4}", h)).join(""));

    for week in calendar.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell.day() {
                None => "    ".to_string(),
                Some(day) if cell.is_today && cell.checked_in => format!("[{:>2}]", day),
                Some(day) if cell.is_today => format!("({:>2})", day),
                Some(day) if cell.checked_in => format!(" {:>2}*", day),
                Some(day) => format!(" {:>2} ", day),
            })
            .collect();
        println!("{}", row);
    }

    println!();
    println!("* checked in   ( ) today   [ ] checked in today");
    println!("{} this month", days(calendar.checked_in_count() as u32));

    if let Some((started, last)) = calendar_summary(data) {
        println!();
        println!("Started on: {}", started);
        println!("Last check-in: {}", last);
    }
}

pub fn quote(quote: &str, encouragement: &str) {
    println!("\"{}\"", quote);
    println!();
    println!("{}", encouragement);
}

pub fn emergency() {
    println!("{}", EMERGENCY_HEADLINE);
    println!("Choose a coping strategy below");
    for (index, strategy) in COPING_STRATEGIES.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, strategy.title);
        println!("   {}", strategy.description);
        println!("   {}", strategy.resource_url);
    }
    println!();
    println!("{}", EMERGENCY_REMINDER);
}

pub fn focus_status(state: &FocusModeState, remaining: Option<Duration>) {
    println!("Focus mode: {}", if state.is_active { "ON" } else { "off" });
    println!(
        "Schedule: {} - {} ({})",
        state.schedule.start_time,
        state.schedule.end_time,
        if state.schedule.enabled { "enabled" } else { "disabled" }
    );
    if let Some(remaining) = remaining {
        println!("Window ends in {}", keepstreak_util::format_duration(remaining));
    }
    blocked_sites(&state.blocked_sites);
}

pub fn blocked_sites(sites: &[String]) {
    println!("Blocked sites ({}):", sites.len());
    for site in sites {
        println!("  - {}", site);
    }
}

pub fn motivation_status(state: &MotivationState) {
    println!(
        "Daily motivation: {}",
        if state.is_subscribed { "subscribed" } else { "off" }
    );
    if let Some(message) = &state.todays_message {
        println!();
        println!("{}", message.theme);
        println!("\"{}\"", message.quote);
    }
    if let Some(day) = state.last_delivered {
        println!();
        println!("Delivered on {}", day.format("%b %-d, %Y"));
    }
}

/// One line per event; JSON lines when `json` is set
pub fn event(event: &Event, json: bool) -> serde_json::Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }

    let time = event.timestamp.format("%H:%M");
    match &event.payload {
        EventPayload::FocusModeChanged { active } => {
            println!("[{}] Focus mode {}", time, if *active { "on" } else { "off" });
        }
        EventPayload::DailyMessageDelivered(message) => {
            println!("[{}] {}: \"{}\"", time, message.theme, message.quote);
        }
        EventPayload::CheckedIn { current_streak } => {
            println!("[{}] Checked in, streak {}", time, current_streak);
        }
        EventPayload::StreakReset { previous_streak } => {
            println!("[{}] Streak of {} reset", time, previous_streak);
        }
        EventPayload::MilestoneAchieved(info) => {
            println!("[{}] {}", time, info.title);
        }
    }
    Ok(())
}

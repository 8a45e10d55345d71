//! Shared types for keepstreak

use chrono::{DateTime, NaiveDate, Utc};
use keepstreak_util::WallClock;
use serde::{Deserialize, Serialize};

/// The single persisted streak record.
///
/// Stored as one JSON document with camelCase keys and ISO-8601 instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakData {
    /// Consecutive days including the most recent check-in, 0 if broken or never started
    pub current_streak: u32,

    /// Historical maximum of `current_streak`, never decreases
    pub longest_streak: u32,

    /// Anchor for day-boundary decisions
    pub last_check_in: Option<DateTime<Utc>>,

    /// Set once when the record is first created
    pub start_date: DateTime<Utc>,

    /// One per successful check-in, never decremented
    pub total_check_ins: u32,

    pub milestones: MilestoneFlags,

    /// Append-only, at most one entry per calendar day
    pub history: Vec<DateTime<Utc>>,
}

impl StreakData {
    /// A fresh record started at `start_date`
    pub fn new(start_date: DateTime<Utc>) -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_check_in: None,
            start_date,
            total_check_ins: 0,
            milestones: MilestoneFlags::default(),
            history: Vec::new(),
        }
    }

    /// Presentation view of the record
    pub fn view(&self) -> StreakView {
        StreakView {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            total_check_ins: self.total_check_ins,
            last_check_in: self.last_check_in,
            history: self.history.clone(),
        }
    }
}

/// Fixed streak-length milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Seven,
    Thirty,
    Ninety,
}

impl Milestone {
    /// All milestones in ascending order
    pub const ALL: [Milestone; 3] = [Milestone::Seven, Milestone::Thirty, Milestone::Ninety];

    pub fn days(self) -> u32 {
        match self {
            Milestone::Seven => 7,
            Milestone::Thirty => 30,
            Milestone::Ninety => 90,
        }
    }

    /// The milestone whose threshold is exactly `days`, if any
    pub fn at(days: u32) -> Option<Milestone> {
        Self::ALL.into_iter().find(|m| m.days() == days)
    }
}

/// One-way achievement flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneFlags {
    pub seven: bool,
    pub thirty: bool,
    pub ninety: bool,
}

impl MilestoneFlags {
    pub fn is_achieved(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::Seven => self.seven,
            Milestone::Thirty => self.thirty,
            Milestone::Ninety => self.ninety,
        }
    }

    /// Set the flag for `milestone`. Returns true if it was previously unset.
    pub fn latch(&mut self, milestone: Milestone) -> bool {
        let flag = match milestone {
            Milestone::Seven => &mut self.seven,
            Milestone::Thirty => &mut self.thirty,
            Milestone::Ninety => &mut self.ninety,
        };
        let newly = !*flag;
        *flag = true;
        newly
    }
}

/// Milestone description for display, also used as the celebration signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneInfo {
    pub days: u32,
    pub title: String,
    pub description: String,
    pub achieved: bool,
}

/// Streak state derived from the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakState {
    /// No current run
    Fresh,
    /// Last check-in was today or yesterday
    Active,
    /// A stored run whose last check-in is older than yesterday
    Broken,
}

/// What the presentation layer displays for the streak
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakView {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_ins: u32,
    pub last_check_in: Option<DateTime<Utc>>,
    pub history: Vec<DateTime<Utc>>,
}

/// Focus mode schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSchedule {
    pub enabled: bool,
    pub start_time: WallClock,
    pub end_time: WallClock,
}

/// Persisted focus mode settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusModeState {
    pub is_active: bool,
    pub schedule: FocusSchedule,
    pub blocked_sites: Vec<String>,
}

/// A themed motivational quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationalMessage {
    pub quote: String,
    pub theme: String,
}

/// Persisted daily motivation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationState {
    pub is_subscribed: bool,

    /// Local calendar day of the last delivery
    pub last_delivered: Option<NaiveDate>,

    pub todays_message: Option<MotivationalMessage>,
}

impl Default for MotivationState {
    fn default() -> Self {
        Self {
            is_subscribed: true,
            last_delivered: None,
            todays_message: None,
        }
    }
}

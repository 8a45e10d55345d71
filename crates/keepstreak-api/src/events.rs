//! Event types streamed to whatever presents keepstreak

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{MilestoneInfo, MotivationalMessage};

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Local>,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            timestamp: keepstreak_util::now(),
            payload,
        }
    }
}

/// All possible events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// A check-in was recorded
    CheckedIn { current_streak: u32 },

    /// The current run was reset
    StreakReset { previous_streak: u32 },

    /// A milestone was reached for the first time
    MilestoneAchieved(MilestoneInfo),

    /// Focus mode switched on or off
    FocusModeChanged { active: bool },

    /// Today's motivational message was delivered
    DailyMessageDelivered(MotivationalMessage),
}

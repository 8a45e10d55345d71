//! Core events emitted by the engine and scheduled tasks

use keepstreak_api::{EventPayload, MilestoneInfo, MotivationalMessage};

use crate::DayContinuity;

/// Events emitted by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// A check-in was recorded
    CheckedIn {
        continuity: DayContinuity,
        current_streak: u32,
    },

    /// The current run was reset
    StreakReset {
        previous_streak: u32,
    },

    /// A milestone was reached for the first time
    MilestoneAchieved(MilestoneInfo),

    /// Focus mode switched on or off
    FocusModeChanged {
        active: bool,
    },

    /// Today's motivational message was delivered
    DailyMessageDelivered(MotivationalMessage),
}

impl From<CoreEvent> for EventPayload {
    fn from(event: CoreEvent) -> Self {
        match event {
            CoreEvent::CheckedIn { current_streak, .. } => EventPayload::CheckedIn { current_streak },
            CoreEvent::StreakReset { previous_streak } => EventPayload::StreakReset { previous_streak },
            CoreEvent::MilestoneAchieved(info) => EventPayload::MilestoneAchieved(info),
            CoreEvent::FocusModeChanged { active } => EventPayload::FocusModeChanged { active },
            CoreEvent::DailyMessageDelivered(message) => EventPayload::DailyMessageDelivered(message),
        }
    }
}

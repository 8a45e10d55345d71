//! Milestone detection and descriptions

use keepstreak_api::{Milestone, MilestoneFlags, MilestoneInfo, StreakData};
use tracing::info;

struct MilestoneText {
    celebration_title: &'static str,
    celebration_description: &'static str,
    listing_title: &'static str,
    listing_description: &'static str,
}

fn text(milestone: Milestone) -> MilestoneText {
    match milestone {
        Milestone::Seven => MilestoneText {
            celebration_title: "7 Day Milestone!",
            celebration_description: "You've completed a full week. Great start to your journey!",
            listing_title: "7 Days",
            listing_description: "One week milestone",
        },
        Milestone::Thirty => MilestoneText {
            celebration_title: "30 Day Milestone!",
            celebration_description: "A full month of dedication. Your commitment is inspiring!",
            listing_title: "30 Days",
            listing_description: "One month milestone",
        },
        Milestone::Ninety => MilestoneText {
            celebration_title: "90 Day Milestone!",
            celebration_description: "Three months strong! You've built a powerful habit.",
            listing_title: "90 Days",
            listing_description: "Three months milestone",
        },
    }
}

/// The celebration shown when `milestone` is reached
pub fn celebration(milestone: Milestone) -> MilestoneInfo {
    let text = text(milestone);
    MilestoneInfo {
        days: milestone.days(),
        title: text.celebration_title.into(),
        description: text.celebration_description.into(),
        achieved: true,
    }
}

/// All milestones with their achievement status, ascending
pub fn milestone_listing(flags: &MilestoneFlags) -> Vec<MilestoneInfo> {
    Milestone::ALL
        .into_iter()
        .map(|milestone| {
            let text = text(milestone);
            MilestoneInfo {
                days: milestone.days(),
                title: text.listing_title.into(),
                description: text.listing_description.into(),
                achieved: flags.is_achieved(milestone),
            }
        })
        .collect()
}

/// Progress toward a milestone of `days` as a whole percentage, capped at 100
pub fn milestone_progress(days: u32, current_streak: u32) -> u8 {
    if days == 0 || current_streak >= days {
        return 100;
    }
    (current_streak * 100 / days) as u8
}

/// Latch the milestone matching the current streak, if not yet achieved.
///
/// Only exact equality triggers. Returns the celebration for a newly
/// achieved milestone.
pub fn evaluate_milestones(data: &mut StreakData) -> Option<MilestoneInfo> {
    let milestone = Milestone::at(data.current_streak)?;

    if !data.milestones.latch(milestone) {
        return None;
    }

    info!(days = milestone.days(), "Milestone achieved");
    Some(celebration(milestone))
}

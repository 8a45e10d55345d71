//! General quotes and streak-based encouragement

use keepstreak_api::Milestone;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const QUOTES: [&str; 15] = [
    "The secret of getting ahead is getting started.",
    "Don't count the days, make the days count.",
    "Fall seven times, stand up eight.",
    "You don't have to be great to start, but you have to start to be great.",
    "Success is the sum of small efforts, repeated day in and day out.",
    "The only bad workout is the one that didn't happen.",
    "It's not about being the best. It's about being better than you were yesterday.",
    "Your future is created by what you do today, not tomorrow.",
    "The only way to do great work is to love what you do.",
    "Discipline is choosing between what you want now and what you want most.",
    "Small daily improvements are the key to staggering long-term results.",
    "The hardest part of any journey is taking the first step.",
    "Motivation gets you started. Habit keeps you going.",
    "Don't stop when you're tired. Stop when you're done.",
    "You're stronger than you think.",
];

/// Where a streak stands, for picking encouragement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncouragementStage {
    Starting,
    Early,
    Milestone,
    Consistent,
}

impl EncouragementStage {
    pub fn for_streak(current_streak: u32) -> Self {
        match current_streak {
            0 => EncouragementStage::Starting,
            n if Milestone::at(n).is_some() => EncouragementStage::Milestone,
            1..=6 => EncouragementStage::Early,
            _ => EncouragementStage::Consistent,
        }
    }

    pub fn messages(self) -> &'static [&'static str] {
        match self {
            EncouragementStage::Starting => &[
                "Today is the perfect day to begin.",
                "The journey of a thousand miles begins with a single step.",
                "Starting is the hardest part. You've got this!",
            ],
            EncouragementStage::Early => &[
                "You're building momentum! Keep going!",
                "The first week is always the toughest. Stay strong!",
                "You're already proving your commitment!",
            ],
            EncouragementStage::Milestone => &[
                "You've reached an incredible milestone!",
                "Look how far you've come!",
                "Your persistence is paying off!",
            ],
            EncouragementStage::Consistent => &[
                "You're building a powerful habit now.",
                "Consistency is your superpower.",
                "Your dedication is inspiring!",
            ],
        }
    }
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUOTES[rng.gen_range(0..QUOTES.len())]
}

/// A random encouragement for the stage `current_streak` is in
pub fn encouragement<R: Rng + ?Sized>(current_streak: u32, rng: &mut R) -> &'static str {
    let messages = EncouragementStage::for_streak(current_streak).messages();
    messages[rng.gen_range(0..messages.len())]
}

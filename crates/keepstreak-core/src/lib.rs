//! Streak state machine and scheduled features for keepstreak
//!
//! This crate is the heart of keepstreak, containing:
//! - Day continuity classification (already today, continues yesterday, gap)
//! - The streak engine (check-in, reset, milestone detection)
//! - Focus mode and daily motivation as scheduled tasks
//! - Static content: quotes, encouragement, coping strategies
//! - The month calendar view of check-in history

mod calendar;
mod continuity;
mod coping;
mod engine;
mod events;
mod focus;
mod milestones;
mod motivation;
mod quotes;
mod scheduler;

pub use calendar::*;
pub use continuity::*;
pub use coping::*;
pub use engine::*;
pub use events::*;
pub use focus::*;
pub use milestones::*;
pub use motivation::*;
pub use quotes::*;
pub use scheduler::*;

//! Shared utilities for keepstreak
//!
//! This crate provides:
//! - Calendar-day arithmetic in the local timezone (same day, yesterday, today)
//! - Wall-clock times and windows for schedules
//! - Error types
//! - Default paths for config and data

mod error;
mod paths;
mod time;

pub use error::*;
pub use paths::*;
pub use time::*;

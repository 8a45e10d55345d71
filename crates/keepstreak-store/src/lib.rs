//! Persistence layer for keepstreak
//!
//! Provides:
//! - A key-value document store trait (one string key, one JSON document)
//! - SQLite and in-memory implementations
//! - The streak record store, which never fails its caller

mod memory;
mod sqlite;
mod streak;
mod traits;

pub use memory::*;
pub use sqlite::*;
pub use streak::*;
pub use traits::*;

use thiserror::Error;

/// Key of the streak record
pub const STREAK_KEY: &str = "streak-tracker-data";

/// Key of the focus mode settings
pub const FOCUS_MODE_KEY: &str = "focus-mode-settings";

/// Key of the daily motivation settings
pub const MOTIVATION_KEY: &str = "daily-motivation-settings";

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

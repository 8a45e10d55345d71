//! Persistence of the streak record

use chrono::{DateTime, Utc};
use keepstreak_api::StreakData;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{KvStore, STREAK_KEY, load_document, save_document};

/// Loads and saves the single streak record under [`STREAK_KEY`].
///
/// Never fails its caller: read and parse problems fall back to a fresh
/// record, write problems are logged and dropped.
#[derive(Clone)]
pub struct StreakStore {
    kv: Arc<dyn KvStore>,
}

impl StreakStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// The persisted record, or a fresh one started at `now`.
    ///
    /// A fresh record is written immediately when nothing was stored, so its
    /// start date is fixed from the first run on. After a read failure nothing
    /// is written; the next mutation replaces the stored document.
    pub fn load(&self, now: DateTime<Utc>) -> StreakData {
        match load_document::<StreakData>(self.kv.as_ref(), STREAK_KEY) {
            Ok(Some(data)) => {
                debug!(
                    current_streak = data.current_streak,
                    total_check_ins = data.total_check_ins,
                    "Streak record loaded"
                );
                data
            }
            Ok(None) => {
                info!("No streak record found, starting fresh");
                let data = StreakData::new(now);
                self.save(&data);
                data
            }
            Err(e) => {
                error!(error = %e, "Error loading streak data, starting fresh");
                StreakData::new(now)
            }
        }
    }

    /// Replace the persisted record
    pub fn save(&self, data: &StreakData) {
        match save_document(self.kv.as_ref(), STREAK_KEY, data) {
            Ok(()) => debug!(current_streak = data.current_streak, "Streak record saved"),
            Err(e) => error!(error = %e, "Error saving streak data"),
        }
    }
}

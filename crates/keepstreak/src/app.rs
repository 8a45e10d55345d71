//! Wiring of configuration, store and features

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use keepstreak_config::Settings;
use keepstreak_core::{DailyMotivation, FocusMode, StreakEngine, TaskScheduler};
use keepstreak_store::{KvStore, SqliteKvStore, StreakStore};
use keepstreak_util::database_path;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::notifier::TerminalNotifier;

/// Everything a command needs, opened once at process entry
pub struct App {
    pub settings: Settings,
    kv: Arc<dyn KvStore>,
}

impl App {
    pub fn open(settings: Settings, data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| settings.app.data_dir.clone());

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

        let db_path = database_path(&data_dir);
        let kv: Arc<dyn KvStore> = Arc::new(
            SqliteKvStore::open(&db_path)
                .with_context(|| format!("Failed to open database {:?}", db_path))?,
        );

        if !kv.is_healthy() {
            warn!(db_path = %db_path.display(), "Store reports unhealthy");
        }
        info!(db_path = %db_path.display(), "Store initialized");

        Ok(Self { settings, kv })
    }

    pub fn streak_engine(&self, now: DateTime<Local>) -> StreakEngine {
        StreakEngine::new(StreakStore::new(self.kv.clone()), now)
    }

    /// Focus mode, aligned with its schedule as of `now`
    pub fn focus_mode(&self, now: DateTime<Local>) -> FocusMode {
        let mut focus = FocusMode::new(self.kv.clone(), &self.settings.focus);
        if let Some(event) = focus.check_schedule(now) {
            debug!(?event, "Focus mode aligned with schedule");
        }
        focus
    }

    /// Scheduled features for `watch`. Focus mode is left unaligned so the
    /// first tick reports any switch.
    pub fn scheduler(&self) -> TaskScheduler {
        let mut scheduler = TaskScheduler::new();
        scheduler.register(Box::new(FocusMode::new(self.kv.clone(), &self.settings.focus)));
        scheduler.register(Box::new(self.daily_motivation()));
        scheduler
    }

    pub fn daily_motivation(&self) -> DailyMotivation {
        DailyMotivation::new(
            self.kv.clone(),
            &self.settings.motivation,
            Box::new(TerminalNotifier::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use keepstreak_core::CoreEvent;

    #[test]
    fn test_first_watch_tick_reports_focus_switch() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::open(Settings::default(), Some(dir.path().to_path_buf())).unwrap();

        let late = Local.with_ymd_and_hms(2025, 5, 10, 23, 0, 0).unwrap();
        let mut scheduler = app.scheduler();
        let events = scheduler.tick(late);

        assert!(events.contains(&CoreEvent::FocusModeChanged { active: true }));
        assert!(scheduler.tick(late).is_empty());
    }
}

//! Streak engine

use chrono::{DateTime, Local, Utc};
use keepstreak_api::{MilestoneInfo, StreakData, StreakState, StreakView};
use keepstreak_store::StreakStore;
use keepstreak_util::is_same_calendar_day;
use tracing::{debug, info};

use crate::{CoreEvent, DayContinuity, evaluate_milestones, milestone_listing, streak_state};

/// Result of a check-in request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Already checked in today; nothing changed
    AlreadyCheckedIn,
    Recorded {
        continuity: DayContinuity,
        current_streak: u32,
        /// Milestone newly achieved by this check-in
        milestone: Option<MilestoneInfo>,
    },
}

impl CheckInOutcome {
    /// Events describing this outcome, in the order they happened
    pub fn events(&self) -> Vec<CoreEvent> {
        match self {
            CheckInOutcome::AlreadyCheckedIn => Vec::new(),
            CheckInOutcome::Recorded {
                continuity,
                current_streak,
                milestone,
            } => {
                let mut events = vec![CoreEvent::CheckedIn {
                    continuity: *continuity,
                    current_streak: *current_streak,
                }];
                if let Some(info) = milestone {
                    events.push(CoreEvent::MilestoneAchieved(info.clone()));
                }
                events
            }
        }
    }
}

/// The streak state machine.
///
/// Holds the in-memory record, which stays authoritative even when
/// persisting it fails. Every mutation is written back through the store.
pub struct StreakEngine {
    store: StreakStore,
    data: StreakData,
    pending_milestone: Option<MilestoneInfo>,
}

impl StreakEngine {
    /// Load the record and evaluate milestones once against it
    pub fn new(store: StreakStore, now: DateTime<Local>) -> Self {
        let mut data = store.load(now.with_timezone(&Utc));

        let pending_milestone = evaluate_milestones(&mut data);
        if pending_milestone.is_some() {
            store.save(&data);
        }

        info!(
            current_streak = data.current_streak,
            longest_streak = data.longest_streak,
            total_check_ins = data.total_check_ins,
            "Streak engine initialized"
        );

        Self {
            store,
            data,
            pending_milestone,
        }
    }

    /// Record a check-in at `now`
    pub fn check_in(&mut self, now: DateTime<Local>) -> CheckInOutcome {
        let continuity = DayContinuity::classify(self.data.last_check_in.as_ref(), &now);

        let current_streak = match continuity {
            DayContinuity::AlreadyToday => {
                debug!("Already checked in today");
                return CheckInOutcome::AlreadyCheckedIn;
            }
            DayContinuity::ContinuesYesterday => self.data.current_streak.saturating_add(1),
            DayContinuity::Gap => 1,
        };

        let instant = now.with_timezone(&Utc);
        let data = &mut self.data;
        data.current_streak = current_streak;
        data.longest_streak = data.longest_streak.max(current_streak);
        data.last_check_in = Some(instant);
        data.total_check_ins = data.total_check_ins.saturating_add(1);
        if !data.history.iter().any(|entry| is_same_calendar_day(entry, &now)) {
            data.history.push(instant);
        }

        self.store.save(&self.data);

        info!(
            continuity = ?continuity,
            current_streak,
            longest_streak = self.data.longest_streak,
            "Check-in recorded"
        );

        let milestone = evaluate_milestones(&mut self.data);
        if let Some(info) = &milestone {
            self.store.save(&self.data);
            self.pending_milestone = Some(info.clone());
        }

        CheckInOutcome::Recorded {
            continuity,
            current_streak,
            milestone,
        }
    }

    /// Zero the current run. Longest streak, totals, history and
    /// milestones are kept.
    pub fn reset_streak(&mut self) -> CoreEvent {
        let previous_streak = self.data.current_streak;

        self.data.current_streak = 0;
        self.data.last_check_in = None;
        self.store.save(&self.data);

        info!(previous_streak, "Streak reset");

        CoreEvent::StreakReset { previous_streak }
    }

    pub fn data(&self) -> &StreakData {
        &self.data
    }

    pub fn view(&self) -> StreakView {
        self.data.view()
    }

    pub fn state(&self, now: DateTime<Local>) -> StreakState {
        streak_state(&self.data, &now)
    }

    /// All milestones with achievement status
    pub fn milestones(&self) -> Vec<MilestoneInfo> {
        milestone_listing(&self.data.milestones)
    }

    /// The pending celebration, if any
    pub fn milestone_signal(&self) -> Option<&MilestoneInfo> {
        self.pending_milestone.as_ref()
    }

    /// Clear the celebration. Achievement flags are untouched.
    pub fn dismiss_milestone(&mut self) {
        self.pending_milestone = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use keepstreak_store::{MemoryKvStore, STREAK_KEY, SqliteKvStore, save_document};
    use std::sync::Arc;

    fn day(d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap() + Duration::days(d as i64 - 1)
    }

    fn make_engine() -> (StreakEngine, Arc<MemoryKvStore>) {
        let kv = Arc::new(MemoryKvStore::new());
        let engine = StreakEngine::new(StreakStore::new(kv.clone()), day(1));
        (engine, kv)
    }

    #[test]
    fn test_first_check_in() {
        let (mut engine, _) = make_engine();

        let outcome = engine.check_in(day(1));
        assert_eq!(
            outcome,
            CheckInOutcome::Recorded {
                continuity: DayContinuity::Gap,
                current_streak: 1,
                milestone: None,
            }
        );

        let data = engine.data();
        assert_eq!(data.current_streak, 1);
        assert_eq!(data.longest_streak, 1);
        assert_eq!(data.total_check_ins, 1);
        assert_eq!(data.history.len(), 1);
        assert_eq!(data.last_check_in, Some(day(1).with_timezone(&Utc)));
        assert_eq!(engine.state(day(1)), StreakState::Active);
    }

    #[test]
    fn test_same_day_check_in_is_idempotent() {
        let (mut engine, kv) = make_engine();

        engine.check_in(day(1));
        let before = engine.data().clone();
        let writes = kv.write_count();

        let later = day(1) + Duration::hours(10);
        assert_eq!(engine.check_in(later), CheckInOutcome::AlreadyCheckedIn);
        assert_eq!(engine.data(), &before);
        assert_eq!(kv.write_count(), writes);
    }

    #[test]
    fn test_consecutive_days_increment() {
        let (mut engine, _) = make_engine();

        for d in 1..=5 {
            engine.check_in(day(d));
        }

        let data = engine.data();
        assert_eq!(data.current_streak, 5);
        assert_eq!(data.total_check_ins, 5);
        assert_eq!(data.history.len(), 5);

        let outcome = engine.check_in(day(6));
        assert!(matches!(
            outcome,
            CheckInOutcome::Recorded {
                continuity: DayContinuity::ContinuesYesterday,
                current_streak: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_gap_resets_to_one() {
        let (mut engine, _) = make_engine();

        for d in 1..=4 {
            engine.check_in(day(d));
        }
        let outcome = engine.check_in(day(6));

        assert!(matches!(
            outcome,
            CheckInOutcome::Recorded {
                continuity: DayContinuity::Gap,
                current_streak: 1,
                ..
            }
        ));
        assert_eq!(engine.data().longest_streak, 4);
        assert_eq!(engine.data().total_check_ins, 5);
    }

    #[test]
    fn test_broken_state_before_next_check_in() {
        let (mut engine, _) = make_engine();
        engine.check_in(day(1));
        engine.check_in(day(2));

        assert_eq!(engine.state(day(3)), StreakState::Active);
        assert_eq!(engine.state(day(4)), StreakState::Broken);
    }

    #[test]
    fn test_longest_streak_is_monotonic() {
        let (mut engine, _) = make_engine();
        let mut previous_longest = 0;

        // Check-ins on a pattern of runs, gaps and resets
        let script: [(u32, bool); 12] = [
            (1, false),
            (2, false),
            (3, false),
            (3, true),
            (4, false),
            (6, false),
            (7, false),
            (8, false),
            (9, false),
            (9, true),
            (12, false),
            (13, false),
        ];

        for (d, reset) in script {
            if reset {
                engine.reset_streak();
            } else {
                engine.check_in(day(d));
            }
            let data = engine.data();
            assert!(data.longest_streak >= previous_longest);
            assert!(data.longest_streak >= data.current_streak);
            previous_longest = data.longest_streak;
        }

        assert_eq!(engine.data().longest_streak, 4);
    }

    #[test]
    fn test_seven_day_milestone_fires_once() {
        let (mut engine, _) = make_engine();

        for d in 1..=6 {
            let outcome = engine.check_in(day(d));
            assert!(matches!(outcome, CheckInOutcome::Recorded { milestone: None, .. }));
        }
        assert!(engine.milestone_signal().is_none());

        let outcome = engine.check_in(day(7));
        let CheckInOutcome::Recorded {
            milestone: Some(info),
            ..
        } = outcome
        else {
            panic!("expected a milestone on day 7");
        };
        assert_eq!(info.days, 7);
        assert_eq!(engine.milestone_signal(), Some(&info));
        assert!(engine.data().milestones.seven);

        engine.dismiss_milestone();
        assert!(engine.milestone_signal().is_none());
        assert!(engine.data().milestones.seven);

        let outcome = engine.check_in(day(8));
        assert!(matches!(outcome, CheckInOutcome::Recorded { milestone: None, .. }));
        assert!(engine.milestone_signal().is_none());
    }

    #[test]
    fn test_milestone_latch_survives_reset_and_rerun() {
        let (mut engine, _) = make_engine();

        for d in 1..=7 {
            engine.check_in(day(d));
        }
        engine.dismiss_milestone();
        engine.reset_streak();
        assert!(engine.data().milestones.seven);

        // A second run through seven days does not celebrate again
        for d in 8..=14 {
            let outcome = engine.check_in(day(d));
            assert!(matches!(outcome, CheckInOutcome::Recorded { milestone: None, .. }));
        }
        assert_eq!(engine.data().current_streak, 7);
        assert!(engine.milestone_signal().is_none());
    }

    #[test]
    fn test_thirty_day_milestone() {
        let (mut engine, _) = make_engine();

        let mut celebrated = Vec::new();
        for d in 1..=31 {
            if let CheckInOutcome::Recorded {
                milestone: Some(info),
                ..
            } = engine.check_in(day(d))
            {
                celebrated.push(info.days);
            }
        }

        assert_eq!(celebrated, vec![7, 30]);
        assert!(engine.data().milestones.thirty);
        assert!(!engine.data().milestones.ninety);
    }

    #[test]
    fn test_reset_preserves_history_and_longest() {
        let (mut engine, _) = make_engine();
        for d in 1..=5 {
            engine.check_in(day(d));
        }
        let before = engine.data().clone();

        let event = engine.reset_streak();
        assert_eq!(event, CoreEvent::StreakReset { previous_streak: 5 });

        let data = engine.data();
        assert_eq!(data.current_streak, 0);
        assert_eq!(data.last_check_in, None);
        assert_eq!(data.longest_streak, 5);
        assert_eq!(data.total_check_ins, 5);
        assert_eq!(data.history, before.history);
        assert_eq!(data.start_date, before.start_date);
        assert_eq!(engine.state(day(5)), StreakState::Fresh);

        // Idempotent
        let once = data.clone();
        engine.reset_streak();
        assert_eq!(engine.data(), &once);
    }

    #[test]
    fn test_total_check_ins_tracks_distinct_days() {
        let (mut engine, _) = make_engine();

        for d in [1, 2, 2, 3, 5, 5, 5, 8] {
            engine.check_in(day(d));
        }
        assert_eq!(engine.data().total_check_ins, 5);
        assert_eq!(engine.data().history.len(), 5);

        // Reset then re-check-in on a day already in history counts again
        engine.reset_streak();
        engine.check_in(day(8));
        assert_eq!(engine.data().total_check_ins, 6);
        assert_eq!(engine.data().history.len(), 5);
        assert_eq!(engine.data().current_streak, 1);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let kv = Arc::new(SqliteKvStore::in_memory().unwrap());
        let store = StreakStore::new(kv.clone());

        {
            let mut engine = StreakEngine::new(store.clone(), day(1));
            engine.check_in(day(1));
            engine.check_in(day(2));
        }

        let engine = StreakEngine::new(store.clone(), day(3));
        assert_eq!(engine.data().current_streak, 2);
        assert_eq!(engine.data().history.len(), 2);
        assert_eq!(engine.data().start_date, day(1).with_timezone(&Utc));

        {
            let mut engine = engine;
            engine.reset_streak();
        }
        let engine = StreakEngine::new(store, day(3));
        assert_eq!(engine.data().current_streak, 0);
        assert_eq!(engine.data().longest_streak, 2);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let (mut engine, kv) = make_engine();
        kv.set_fail_writes(true);

        engine.check_in(day(1));
        engine.check_in(day(2));
        assert_eq!(engine.data().current_streak, 2);

        kv.set_fail_writes(false);
        let reloaded = StreakEngine::new(StreakStore::new(kv), day(2));
        assert_eq!(reloaded.data().current_streak, 0);
    }

    #[test]
    fn test_construction_latches_pending_milestone() {
        let kv = Arc::new(MemoryKvStore::new());
        let mut data = StreakData::new(day(1).with_timezone(&Utc));
        data.current_streak = 7;
        data.longest_streak = 7;
        data.last_check_in = Some(day(7).with_timezone(&Utc));
        save_document(&*kv, STREAK_KEY, &data).unwrap();

        let engine = StreakEngine::new(StreakStore::new(kv.clone()), day(7));
        assert_eq!(engine.milestone_signal().map(|m| m.days), Some(7));

        // Latched and persisted, so the next start is quiet
        let engine = StreakEngine::new(StreakStore::new(kv), day(7));
        assert!(engine.milestone_signal().is_none());
        assert!(engine.data().milestones.seven);
    }

    #[test]
    fn test_outcome_events() {
        let (mut engine, _) = make_engine();
        for d in 1..=6 {
            engine.check_in(day(d));
        }

        let events = engine.check_in(day(7)).events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CoreEvent::CheckedIn { current_streak: 7, .. }));
        assert!(matches!(&events[1], CoreEvent::MilestoneAchieved(info) if info.days == 7));

        assert!(engine.check_in(day(7)).events().is_empty());
    }
}

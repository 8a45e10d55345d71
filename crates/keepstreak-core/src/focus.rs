//! Focus mode: scheduled site blocking

use chrono::{DateTime, Local};
use keepstreak_api::{FocusModeState, FocusSchedule};
use keepstreak_config::{FocusDefaults, normalize_site};
use keepstreak_store::{FOCUS_MODE_KEY, KvStore, load_document, save_document};
use keepstreak_util::{KeepstreakError, TimeWindow};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::{CoreEvent, ScheduledTask};

/// Focus mode settings and activation.
///
/// While the schedule is enabled every poll forces activation to match the
/// window, so a manual toggle only lasts until the next poll.
pub struct FocusMode {
    kv: Arc<dyn KvStore>,
    state: FocusModeState,
}

impl FocusMode {
    /// Load persisted settings, or start from `defaults`
    pub fn new(kv: Arc<dyn KvStore>, defaults: &FocusDefaults) -> Self {
        let state = match load_document::<FocusModeState>(kv.as_ref(), FOCUS_MODE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => {
                let state = defaults.initial_state();
                if let Err(e) = save_document(kv.as_ref(), FOCUS_MODE_KEY, &state) {
                    error!(error = %e, "Error saving focus mode settings");
                }
                state
            }
            Err(e) => {
                error!(error = %e, "Error loading focus mode settings, using defaults");
                defaults.initial_state()
            }
        };

        debug!(
            active = state.is_active,
            scheduled = state.schedule.enabled,
            sites = state.blocked_sites.len(),
            "Focus mode loaded"
        );

        Self { kv, state }
    }

    pub fn state(&self) -> &FocusModeState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn schedule(&self) -> &FocusSchedule {
        &self.state.schedule
    }

    pub fn blocked_sites(&self) -> &[String] {
        &self.state.blocked_sites
    }

    fn window(&self) -> TimeWindow {
        TimeWindow::new(self.state.schedule.start_time, self.state.schedule.end_time)
    }

    /// Whether `now` falls inside the scheduled window, regardless of `enabled`
    pub fn in_window(&self, now: &DateTime<Local>) -> bool {
        self.window().contains(now)
    }

    /// Time left in the scheduled window, when the schedule is enabled and
    /// `now` is inside it
    pub fn remaining(&self, now: &DateTime<Local>) -> Option<Duration> {
        if !self.state.schedule.enabled {
            return None;
        }
        self.window().remaining_duration(now)
    }

    /// Align activation with the schedule. Returns an event on transition.
    pub fn check_schedule(&mut self, now: DateTime<Local>) -> Option<CoreEvent> {
        if !self.state.schedule.enabled {
            return None;
        }

        let in_window = self.in_window(&now);
        if in_window == self.state.is_active {
            return None;
        }

        self.state.is_active = in_window;
        self.persist();

        info!(active = in_window, "Focus mode switched by schedule");
        Some(CoreEvent::FocusModeChanged { active: in_window })
    }

    /// Flip activation manually
    pub fn toggle(&mut self) -> CoreEvent {
        self.state.is_active = !self.state.is_active;
        self.persist();

        info!(active = self.state.is_active, "Focus mode toggled");
        CoreEvent::FocusModeChanged {
            active: self.state.is_active,
        }
    }

    /// Replace the schedule. A window whose start equals its end would
    /// never be active and is rejected.
    pub fn update_schedule(&mut self, schedule: FocusSchedule) -> keepstreak_util::Result<()> {
        if schedule.start_time == schedule.end_time {
            return Err(KeepstreakError::validation(format!(
                "Focus window start and end are both {}",
                schedule.start_time
            )));
        }

        self.state.schedule = schedule;
        self.persist();

        info!(
            enabled = schedule.enabled,
            start = %schedule.start_time,
            end = %schedule.end_time,
            "Focus schedule updated"
        );
        Ok(())
    }

    /// Replace the blocked site list. Entries are normalized to bare hosts;
    /// invalid entries and duplicates are dropped.
    pub fn update_blocked_sites<S: AsRef<str>>(&mut self, sites: &[S]) {
        let mut hosts: Vec<String> = Vec::with_capacity(sites.len());
        for site in sites {
            match normalize_site(site.as_ref()) {
                Some(host) if !hosts.contains(&host) => hosts.push(host),
                Some(_) => {}
                None => debug!(site = site.as_ref(), "Ignoring invalid site"),
            }
        }

        self.state.blocked_sites = hosts;
        self.persist();

        info!(count = self.state.blocked_sites.len(), "Blocked sites updated");
    }

    /// Whether a URL or host is blocked right now: focus mode is active and
    /// the host is a blocked site or one of its subdomains
    pub fn is_blocked(&self, url: &str) -> bool {
        if !self.state.is_active {
            return false;
        }

        let Some(host) = normalize_site(url) else {
            return false;
        };

        self.state.blocked_sites.iter().any(|site| {
            host == *site
                || host
                    .strip_suffix(site.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn persist(&self) {
        if let Err(e) = save_document(self.kv.as_ref(), FOCUS_MODE_KEY, &self.state) {
            error!(error = %e, "Error saving focus mode settings");
        }
    }
}

impl ScheduledTask for FocusMode {
    fn name(&self) -> &'static str {
        "focus-mode"
    }

    fn tick(&mut self, now: DateTime<Local>) -> Vec<CoreEvent> {
        self.check_schedule(now).into_iter().collect()
    }
}

//! Validated settings structures

use crate::schema::{RawAppConfig, RawConfig, RawFocusConfig, RawMotivationConfig};
use crate::validation::normalize_site;
use keepstreak_api::{FocusModeState, FocusSchedule, MotivationState};
use keepstreak_util::{WallClock, default_data_dir};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Sites blocked by default while focus mode is active
pub const DEFAULT_BLOCKED_SITES: [&str; 7] = [
    "adult-site-1.com",
    "adult-site-2.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "tiktok.com",
    "reddit.com",
];

/// Validated settings ready for use by the engine and scheduler
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub app: AppConfig,
    pub focus: FocusDefaults,
    pub motivation: MotivationDefaults,
}

impl Settings {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            app: AppConfig::from_raw(raw.app),
            focus: FocusDefaults::from_raw(raw.focus),
            motivation: MotivationDefaults::from_raw(raw.motivation),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub tick_interval: Duration,
}

impl AppConfig {
    fn from_raw(raw: RawAppConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(default_data_dir),
            log_level: raw
                .log_level
                .map(|l| l.to_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            tick_interval: raw
                .tick_interval_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TICK_INTERVAL),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_raw(RawAppConfig::default())
    }
}

/// Focus mode settings used when nothing has been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusDefaults {
    pub schedule: FocusSchedule,
    pub blocked_sites: Vec<String>,
}

impl FocusDefaults {
    fn from_raw(raw: RawFocusConfig) -> Self {
        let fallback = Self::default();

        // Values were validated; anything unparsable here falls back to defaults
        let start_time = raw
            .start
            .and_then(|s| s.parse().ok())
            .unwrap_or(fallback.schedule.start_time);
        let end_time = raw
            .end
            .and_then(|s| s.parse().ok())
            .unwrap_or(fallback.schedule.end_time);

        let blocked_sites = match raw.blocked_sites {
            Some(sites) => {
                let mut out: Vec<String> = Vec::new();
                for host in sites.iter().filter_map(|s| normalize_site(s)) {
                    if !out.contains(&host) {
                        out.push(host);
                    }
                }
                out
            }
            None => fallback.blocked_sites,
        };

        Self {
            schedule: FocusSchedule {
                enabled: raw.enabled.unwrap_or(fallback.schedule.enabled),
                start_time,
                end_time,
            },
            blocked_sites,
        }
    }

    /// The focus state to persist on first run
    pub fn initial_state(&self) -> FocusModeState {
        FocusModeState {
            is_active: false,
            schedule: self.schedule,
            blocked_sites: self.blocked_sites.clone(),
        }
    }
}

impl Default for FocusDefaults {
    fn default() -> Self {
        Self {
            schedule: FocusSchedule {
                enabled: true,
                start_time: WallClock { hour: 22, minute: 0 },
                end_time: WallClock { hour: 6, minute: 0 },
            },
            blocked_sites: DEFAULT_BLOCKED_SITES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Daily motivation settings used when nothing has been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotivationDefaults {
    pub subscribed: bool,
}

impl MotivationDefaults {
    fn from_raw(raw: RawMotivationConfig) -> Self {
        Self {
            subscribed: raw.subscribed.unwrap_or(true),
        }
    }

    /// The motivation state to persist on first run
    pub fn initial_state(&self) -> MotivationState {
        MotivationState {
            is_subscribed: self.subscribed,
            ..MotivationState::default()
        }
    }
}

impl Default for MotivationDefaults {
    fn default() -> Self {
        Self::from_raw(RawMotivationConfig::default())
    }
}

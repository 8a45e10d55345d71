//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Application settings
    #[serde(default)]
    pub app: RawAppConfig,

    /// Focus mode defaults
    #[serde(default)]
    pub focus: RawFocusConfig,

    /// Daily motivation defaults
    #[serde(default)]
    pub motivation: RawMotivationConfig,
}

/// Application-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAppConfig {
    /// Directory holding the key-value database
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,

    /// How often `watch` ticks the scheduled tasks
    pub tick_interval_seconds: Option<u64>,
}

/// Focus mode defaults, used until the user changes them
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawFocusConfig {
    /// Whether the schedule drives focus mode
    pub enabled: Option<bool>,

    /// Start time (HH:MM format)
    pub start: Option<String>,

    /// End time (HH:MM format)
    pub end: Option<String>,

    /// Sites blocked while focus mode is active
    pub blocked_sites: Option<Vec<String>>,
}

/// Daily motivation defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMotivationConfig {
    /// Deliver a quote each day
    pub subscribed: Option<bool>,
}

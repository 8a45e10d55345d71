//! Configuration validation

use crate::schema::RawConfig;
use crate::settings::FocusDefaults;
use keepstreak_util::WallClock;
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Log levels accepted in `[app].log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid time format for {field} '{value}': {message}")]
    InvalidTimeFormat {
        field: &'static str,
        value: String,
        message: String,
    },

    #[error("tick_interval_seconds must be greater than zero")]
    ZeroTickInterval,

    #[error("Focus window starts and ends at {0}")]
    EmptyFocusWindow(String),

    #[error("Invalid blocked site '{0}'")]
    InvalidSite(String),

    #[error("Duplicate blocked site: {0}")]
    DuplicateSite(String),

    #[error("Unknown log level '{0}' (expected one of trace, debug, info, warn, error)")]
    UnknownLogLevel(String),
}

/// Validate a raw configuration, collecting every problem
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(level) = &config.app.log_level
        && !LOG_LEVELS.contains(&level.to_lowercase().as_str())
    {
        errors.push(ValidationError::UnknownLogLevel(level.clone()));
    }

    if config.app.tick_interval_seconds == Some(0) {
        errors.push(ValidationError::ZeroTickInterval);
    }

    for (field, value) in [("start", &config.focus.start), ("end", &config.focus.end)] {
        if let Some(value) = value
            && let Err(e) = value.parse::<WallClock>()
        {
            let message = match e {
                keepstreak_util::KeepstreakError::InvalidTime { message, .. } => message,
                other => other.to_string(),
            };
            errors.push(ValidationError::InvalidTimeFormat {
                field,
                value: value.clone(),
                message,
            });
        }
    }

    let defaults = FocusDefaults::default().schedule;
    let start = match &config.focus.start {
        Some(value) => value.parse::<WallClock>().ok(),
        None => Some(defaults.start_time),
    };
    let end = match &config.focus.end {
        Some(value) => value.parse::<WallClock>().ok(),
        None => Some(defaults.end_time),
    };
    if let (Some(start), Some(end)) = (start, end)
        && start == end
    {
        errors.push(ValidationError::EmptyFocusWindow(start.to_string()));
    }

    if let Some(sites) = &config.focus.blocked_sites {
        let mut seen = HashSet::new();
        for site in sites {
            match normalize_site(site) {
                Some(host) => {
                    if !seen.insert(host.clone()) {
                        errors.push(ValidationError::DuplicateSite(host));
                    }
                }
                None => errors.push(ValidationError::InvalidSite(site.clone())),
            }
        }
    }

    errors
}

/// Reduce a site or URL to a bare lowercase host.
///
/// `https://www.Reddit.com/r/all` becomes `reddit.com`. Entries without a
/// scheme are read as `http://` URLs. Returns `None` for empty input, input
/// containing whitespace, or anything that does not parse to a host.
pub fn normalize_site(site: &str) -> Option<String> {
    let trimmed = site.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }

    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{}", trimmed))
    }
    .ok()?;

    let host = parsed.host_str()?.to_lowercase();
    let host = host.trim_end_matches('.');
    let host = host.strip_prefix("www.").unwrap_or(host);

    (!host.is_empty()).then(|| host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RawAppConfig, RawFocusConfig};

    fn config_with(app: RawAppConfig, focus: RawFocusConfig) -> RawConfig {
        RawConfig {
            config_version: 1,
            app,
            focus,
            motivation: Default::default(),
        }
    }

    #[test]
    fn test_normalize_site() {
        assert_eq!(normalize_site("reddit.com").as_deref(), Some("reddit.com"));
        assert_eq!(normalize_site("  Reddit.COM ").as_deref(), Some("reddit.com"));
        assert_eq!(
            normalize_site("https://www.facebook.com/feed?x=1").as_deref(),
            Some("facebook.com")
        );
        assert_eq!(normalize_site("http://localhost:8080/").as_deref(), Some("localhost"));
        assert_eq!(normalize_site(""), None);
        assert_eq!(normalize_site("bad site.com"), None);
    }

    #[test]
    fn test_normalize_site_url_forms() {
        assert_eq!(
            normalize_site("https://user@reddit.com/r/all").as_deref(),
            Some("reddit.com")
        );
        assert_eq!(
            normalize_site("https://u:p@www.reddit.com/").as_deref(),
            Some("reddit.com")
        );
        assert_eq!(normalize_site("HTTPS://reddit.com./x").as_deref(), Some("reddit.com"));
        assert_eq!(normalize_site("reddit.com:443/r/rust").as_deref(), Some("reddit.com"));
        assert_eq!(normalize_site("https://"), None);
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        let config = config_with(
            RawAppConfig {
                data_dir: None,
                log_level: Some("DEBUG".into()),
                tick_interval_seconds: Some(60),
            },
            RawFocusConfig {
                enabled: Some(true),
                start: Some("21:30".into()),
                end: Some("07:00".into()),
                blocked_sites: Some(vec!["reddit.com".into(), "tiktok.com".into()]),
            },
        );

        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_collects_every_error() {
        let config = config_with(
            RawAppConfig {
                data_dir: None,
                log_level: Some("verbose".into()),
                tick_interval_seconds: Some(0),
            },
            RawFocusConfig {
                enabled: None,
                start: Some("25:00".into()),
                end: Some("noon".into()),
                blocked_sites: Some(vec![
                    "reddit.com".into(),
                    "https://www.reddit.com".into(),
                    " ".into(),
                ]),
            },
        );

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::UnknownLogLevel("verbose".into())));
        assert!(errors.contains(&ValidationError::ZeroTickInterval));
        assert!(errors.contains(&ValidationError::DuplicateSite("reddit.com".into())));
        assert!(errors.contains(&ValidationError::InvalidSite(" ".into())));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidTimeFormat { field: "start", message, .. } if message.starts_with("Expected HH:MM")
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidTimeFormat { field: "end", .. }
        )));
    }

    #[test]
    fn test_empty_focus_window() {
        let config = config_with(
            RawAppConfig::default(),
            RawFocusConfig {
                start: Some("06:00".into()),
                ..Default::default()
            },
        );

        // End falls back to the 06:00 default
        assert_eq!(
            validate_config(&config),
            vec![ValidationError::EmptyFocusWindow("06:00".into())]
        );
    }
}

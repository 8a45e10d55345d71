//! Configuration parsing and validation for keepstreak
//!
//! keepstreak reads one versioned TOML file. It sets where data lives, how
//! verbose logging is and how often `watch` ticks, and seeds the focus mode
//! and daily motivation documents the first time they are created. Every
//! problem in a file is reported at once.

mod schema;
mod settings;
mod validation;

pub use schema::*;
pub use settings::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Config is not valid TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config has {} problem(s): {errors:?}", .errors.len())]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Config version {0} is not supported")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// The only `config_version` this build understands
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Read `path` and hand it to [`parse_config`]
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Like [`load_config`], but a missing file yields default settings
pub fn load_config_or_default(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let path = path.as_ref();
    match load_config(path) {
        Err(ConfigError::ReadError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(config_path = %path.display(), "No config file, using defaults");
            Ok(Settings::default())
        }
        other => other,
    }
}

/// Check the version, then validate, then resolve defaults
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(Settings::from_raw(raw))
}

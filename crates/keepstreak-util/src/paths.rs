//! Default paths for keepstreak
//!
//! Paths are user-writable XDG locations:
//! - Config: `$XDG_CONFIG_HOME/keepstreak/config.toml` or `~/.config/keepstreak/config.toml`
//! - Data: `$XDG_DATA_HOME/keepstreak` or `~/.local/share/keepstreak`

use std::path::PathBuf;

/// Application subdirectory name
const APP_DIR: &str = "keepstreak";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "config.toml";

/// Database filename within the data directory
const DATABASE_FILENAME: &str = "keepstreak.db";

fn xdg_dir(xdg_var: &str, home_fallback: &[&str], last_resort: &str) -> PathBuf {
    if let Ok(dir) = std::env::var(xdg_var)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        let mut path = PathBuf::from(home);
        for part in home_fallback {
            path.push(part);
        }
        return path.join(APP_DIR);
    }

    PathBuf::from("/tmp").join(APP_DIR).join(last_resort)
}

/// Get the default configuration file path.
pub fn default_config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", &[".config"], "config").join(CONFIG_FILENAME)
}

/// Get the default data directory.
///
/// The `KEEPSTREAK_DATA_DIR` override is applied by the CLI, not here.
pub fn default_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", &[".local", "share"], "data")
}

/// Path of the key-value database inside a data directory
pub fn database_path(data_dir: impl Into<PathBuf>) -> PathBuf {
    data_dir.into().join(DATABASE_FILENAME)
}

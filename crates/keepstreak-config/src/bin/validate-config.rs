//! Checks a keepstreak config file and prints the settings it resolves to

use keepstreak_config::{CURRENT_CONFIG_VERSION, ConfigError, Settings, load_config};
use std::path::PathBuf;
use std::process::ExitCode;

fn on_off(flag: bool, on: &'static str, off: &'static str) -> &'static str {
    if flag { on } else { off }
}

fn print_settings(settings: &Settings) {
    let schedule = &settings.focus.schedule;

    println!("✓ Configuration is valid (version {})", CURRENT_CONFIG_VERSION);
    println!();
    println!("  data_dir       {}", settings.app.data_dir.display());
    println!("  log_level      {}", settings.app.log_level);
    println!("  tick_interval  {}s", settings.app.tick_interval.as_secs());
    println!(
        "  focus          {}-{}, schedule {}",
        schedule.start_time,
        schedule.end_time,
        on_off(schedule.enabled, "enabled", "disabled")
    );
    println!(
        "  blocked_sites  {}",
        if settings.focus.blocked_sites.is_empty() {
            "(none)".to_string()
        } else {
            settings.focus.blocked_sites.join(", ")
        }
    );
    println!(
        "  motivation     {}",
        on_off(settings.motivation.subscribed, "subscribed", "off")
    );
}

fn print_error(error: &ConfigError) {
    eprintln!("✗ Configuration rejected");
    match error {
        ConfigError::ValidationFailed { errors } => {
            for err in errors {
                eprintln!("  - {}", err);
            }
        }
        ConfigError::UnsupportedVersion(version) => {
            eprintln!("  config_version {} is not {}", version, CURRENT_CONFIG_VERSION);
        }
        other => eprintln!("  {}", other),
    }
}

fn main() -> ExitCode {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: validate-config <config-file>");
        eprintln!(
            "The keepstreak default is {}",
            keepstreak_util::default_config_path().display()
        );
        return ExitCode::from(2);
    };

    match load_config(&path) {
        Ok(settings) => {
            print_settings(&settings);
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

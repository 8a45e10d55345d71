//! keepstreak - daily check-in streak tracker
//!
//! Entry point for the `keepstreak` command. It wires together:
//! - Configuration loading
//! - Store initialization
//! - The streak engine
//! - Focus mode and daily motivation, ticked by `watch`

mod app;
mod notifier;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keepstreak_api::{Event, FocusSchedule};
use keepstreak_config::load_config_or_default;
use keepstreak_core::{MonthCalendar, encouragement, random_quote};
use keepstreak_util::{WallClock, calendar_day, default_config_path};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// keepstreak - Daily check-in streak tracker
#[derive(Parser, Debug)]
#[command(name = "keepstreak", version)]
#[command(about = "Daily check-in streak tracker", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/keepstreak/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set KEEPSTREAK_DATA_DIR env var)
    #[arg(short, long, env = "KEEPSTREAK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (overrides the config file; RUST_LOG overrides both)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Write logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check in for today
    CheckIn,
    /// Reset the current streak (longest streak and history are kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the current streak
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Show milestone progress
    Milestones,
    /// Show this month's check-ins
    Calendar,
    /// Show a motivational quote
    Quote,
    /// Show coping strategies for a difficult moment
    Emergency,
    /// Focus mode
    Focus {
        #[command(subcommand)]
        action: FocusAction,
    },
    /// Daily motivation
    Motivation {
        #[command(subcommand)]
        action: MotivationAction,
    },
    /// Run scheduled features until interrupted
    Watch {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum FocusAction {
    /// Show focus mode state and schedule
    Status,
    /// Switch focus mode on or off
    Toggle,
    /// Change the focus schedule
    Schedule {
        /// Window start, HH:MM
        #[arg(long)]
        start: Option<WallClock>,
        /// Window end, HH:MM
        #[arg(long)]
        end: Option<WallClock>,
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
    },
    /// List blocked sites, or replace them when sites are given
    Sites { sites: Vec<String> },
    /// Check whether a URL is blocked right now
    Check { url: String },
}

#[derive(Subcommand, Debug)]
enum MotivationAction {
    /// Show today's message, delivering one if due
    Status,
    /// Subscribe or unsubscribe
    Toggle,
}

async fn run(command: Command, app: &App) -> Result<()> {
    let now = keepstreak_util::now();

    match command {
        Command::CheckIn => {
            let mut engine = app.streak_engine(now);
            let outcome = engine.check_in(now);
            for event in outcome.events() {
                debug!(?event, "Check-in event");
            }
            output::check_in(&outcome, engine.data());

            if let Some(milestone) = engine.milestone_signal() {
                output::celebration(milestone);
                engine.dismiss_milestone();
            }
        }

        Command::Reset { yes } => {
            let mut engine = app.streak_engine(now);
            let current = engine.data().current_streak;

            if !yes && current > 0 && !confirm(&format!("Reset your {}-day streak?", current))? {
                println!("Streak kept.");
                return Ok(());
            }

            engine.reset_streak();
            println!(
                "Streak reset. Longest streak stays at {} days.",
                engine.data().longest_streak
            );
        }

        Command::Status { json } => {
            let engine = app.streak_engine(now);
            let view = engine.view();
            let state = engine.state(now);

            if json {
                let report = output::StatusReport {
                    state,
                    start_date: engine.data().start_date,
                    view,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let line = encouragement(view.current_streak, &mut rand::thread_rng());
                output::status(&view, state, &engine.data().start_date, line);
            }

            if !json && let Some(milestone) = engine.milestone_signal() {
                output::celebration(milestone);
            }
        }

        Command::Milestones => {
            let engine = app.streak_engine(now);
            output::milestones(&engine.milestones(), engine.data().current_streak);
        }

        Command::Calendar => {
            let engine = app.streak_engine(now);
            let calendar = MonthCalendar::build(calendar_day(&now), &engine.data().history);
            output::calendar(&calendar, engine.data());
        }

        Command::Quote => {
            let engine = app.streak_engine(now);
            let mut rng = rand::thread_rng();
            let quote = random_quote(&mut rng);
            output::quote(quote, encouragement(engine.data().current_streak, &mut rng));
        }

        Command::Emergency => output::emergency(),

        Command::Focus { action } => run_focus(action, app, now)?,

        Command::Motivation { action } => {
            let mut motivation = app.daily_motivation();
            if let MotivationAction::Toggle = action {
                let subscribed = motivation.toggle_subscription();
                println!(
                    "Daily motivation {}",
                    if subscribed { "subscribed" } else { "unsubscribed" }
                );
                println!();
            }
            motivation.deliver_if_due(now);
            output::motivation_status(motivation.state());
        }

        Command::Watch { json } => watch(app, json).await?,
    }

    Ok(())
}

fn run_focus(action: FocusAction, app: &App, now: chrono::DateTime<chrono::Local>) -> Result<()> {
    let mut focus = app.focus_mode(now);

    match action {
        FocusAction::Status => {}
        FocusAction::Toggle => {
            focus.toggle();
            if focus.schedule().enabled && focus.in_window(&now) != focus.is_active() {
                println!("Note: the enabled schedule will switch this back at the next check.");
                println!();
            }
        }
        FocusAction::Schedule {
            start,
            end,
            enable,
            disable,
        } => {
            let current = *focus.schedule();
            let schedule = FocusSchedule {
                enabled: match (enable, disable) {
                    (true, _) => true,
                    (_, true) => false,
                    _ => current.enabled,
                },
                start_time: start.unwrap_or(current.start_time),
                end_time: end.unwrap_or(current.end_time),
            };
            focus
                .update_schedule(schedule)
                .context("Invalid focus schedule")?;
            if let Some(event) = focus.check_schedule(now) {
                debug!(?event, "Focus mode aligned with new schedule");
            }
        }
        FocusAction::Sites { sites } => {
            if !sites.is_empty() {
                focus.update_blocked_sites(&sites);
            }
            output::blocked_sites(focus.blocked_sites());
            return Ok(());
        }
        FocusAction::Check { url } => {
            let blocked = focus.is_blocked(&url);
            println!("{}: {}", url, if blocked { "blocked" } else { "allowed" });
            return Ok(());
        }
    }

    output::focus_status(focus.state(), focus.remaining(&now));
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn watch(app: &App, json: bool) -> Result<()> {
    let mut scheduler = app.scheduler();

    let interval = app.settings.app.tick_interval;
    let mut tick_timer = tokio::time::interval(interval);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_secs = interval.as_secs(),
        tasks = scheduler.len(),
        "Watching"
    );

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                }
                info!("Received Ctrl-C, stopping");
                break;
            }

            _ = tick_timer.tick() => {
                let now = keepstreak_util::now();
                for event in scheduler.tick(now) {
                    debug!(?event, "Scheduled task event");
                    output::event(&Event::new(event.into()), json)?;
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    // Initialize logging
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| settings.app.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config_path = %args.config.display(),
        mock_time = keepstreak_util::is_mock_time_active(),
        "keepstreak starting"
    );

    let app = App::open(settings, args.data_dir)?;

    run(args.command, &app).await
}

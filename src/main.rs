//! seatwatch binary
//!
//! Wires configuration, logging, and the watcher together and drives the
//! poll loop to its terminal state.

use anyhow::{Context, Result};
use seatwatch::config::{ConfigManager, WatchConfig};
use seatwatch::notify::SmtpNotifier;
use seatwatch::scrape::PageFetcher;
use seatwatch::utils;
use seatwatch::watcher::{RunOutcome, StatusWatcher, SystemClock};
use tracing::{info, warn};

fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("seatwatch v{} starting...", env!("CARGO_PKG_VERSION"));

    // First run: write a template and bail so the user has something to edit
    // instead of a watcher polling nowhere.
    let config_path = ConfigManager::config_path();
    if !config_path.exists() {
        ConfigManager::save(&WatchConfig::default())
            .context("Failed to write configuration template")?;
        anyhow::bail!(
            "No configuration found; a template was written to {}.\n\
             Fill in target.url and the email settings, then run seatwatch again.",
            config_path.display()
        );
    }

    let mut config = ConfigManager::load().context("Failed to load configuration")?;
    ConfigManager::apply_env_overrides(&mut config);
    config.validate().with_context(|| {
        format!("Invalid configuration at {}", config_path.display())
    })?;

    info!(
        "Watching {} every {}s",
        config.target.url, config.polling.interval_secs
    );

    let fetcher =
        PageFetcher::new(&config.target).context("Failed to create the page fetcher")?;
    let notifier = SmtpNotifier::new(config.email.clone());
    let mut watcher = StatusWatcher::new(
        fetcher,
        notifier,
        SystemClock,
        config.markers.clone(),
        config.polling.clone(),
    );

    match watcher.run() {
        RunOutcome::SeatsOpen { notified: true } => {
            info!("Seats are open and the notification was delivered; exiting");
        }
        RunOutcome::SeatsOpen { notified: false } => {
            warn!("Seats are open but the notification failed; see the session log. Exiting");
        }
        RunOutcome::AttemptsExhausted => {
            warn!("Polling attempt bound reached without open seats; exiting");
        }
    }

    Ok(())
}

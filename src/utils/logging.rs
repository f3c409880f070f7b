//! Logging system initialization
//!
//! Sets up tracing with two sinks: a console layer on stdout (the watcher's
//! one-line-per-poll status output) and a session log file under the
//! seatwatch config directory, rotated on startup to keep a short history of
//! past runs.

use crate::config::ConfigManager;
use crate::error::{Result, SeatWatchError};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (watch.log.1 through watch.log.4)
const MAX_LOG_FILES: u8 = 4;

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via the `RUST_LOG`
/// environment variable. Existing session logs are rotated before the fresh
/// one is opened.
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::ensure_config_dir()?;

    let log_path = log_dir.join("watch.log");
    rotate_logs_on_startup(&log_path)?;

    // Rotation is handled manually above; the appender only ever writes the
    // current session's file
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("watch")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| SeatWatchError::Config(Box::new(e)))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| SeatWatchError::Config(Box::new(e)))?;

    tracing::info!("seatwatch v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// Keeps the last few sessions apart:
/// - watch.log.4 is deleted (oldest)
/// - watch.log.3 -> watch.log.4, and so on down to watch.log.1
/// - watch.log -> watch.log.1
/// - A fresh watch.log is created by the logger
fn rotate_logs_on_startup(log_path: &PathBuf) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path.parent().ok_or_else(|| {
        SeatWatchError::Config(crate::error::StringError::new("Invalid log path"))
    })?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| {
            SeatWatchError::Config(crate::error::StringError::new("Invalid log filename"))
        })?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    let log_1 = log_dir.join(format!("{log_name}.1"));
    std::fs::rename(log_path, &log_1)?;

    Ok(())
}

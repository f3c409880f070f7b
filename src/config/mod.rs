//! Configuration management module
//!
//! This module handles loading, saving, and validating the watcher
//! configuration. Configuration is stored as JSON in the seatwatch config
//! directory with atomic writes to prevent corruption; the SMTP password is
//! taken from the environment when present.

pub mod manager;
pub mod models;

pub use manager::{ConfigManager, DIR_ENV_VAR, PASSWORD_ENV_VAR};
pub use models::{EmailConfig, PollingPolicy, StatusMarkers, TargetPage, WatchConfig};

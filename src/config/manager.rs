//! Configuration manager for loading and saving the watch configuration
//!
//! Configuration lives in `config.json` under the seatwatch directory and is
//! written atomically to prevent corruption. The SMTP password can be
//! supplied through the environment so the secret never touches disk.

use crate::config::models::WatchConfig;
use crate::error::{Result, SeatWatchError};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable overriding the config/log directory
pub const DIR_ENV_VAR: &str = "SEATWATCH_DIR";

/// Environment variable carrying the SMTP password
pub const PASSWORD_ENV_VAR: &str = "SEATWATCH_SMTP_PASSWORD";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the directory holding `config.json` and session logs
    ///
    /// `$SEATWATCH_DIR` wins, then `$XDG_CONFIG_HOME/seatwatch`, then
    /// `~/.config/seatwatch`.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DIR_ENV_VAR) {
            return PathBuf::from(dir);
        }
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("seatwatch");
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config").join("seatwatch")
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::config_dir();
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns default
    /// configuration. A corrupt file is reported but not treated as fatal.
    pub fn load() -> Result<WatchConfig> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(WatchConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str(&json) {
            Ok(config) => {
                info!("Configuration loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(WatchConfig::default())
            }
        }
    }

    /// Apply environment overrides to a loaded configuration
    ///
    /// The SMTP password always prefers `SEATWATCH_SMTP_PASSWORD` over the
    /// config-file value.
    pub fn apply_env_overrides(config: &mut WatchConfig) {
        if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
            && !password.is_empty()
        {
            config.email.password = Some(password);
        }
    }

    /// Save configuration to disk with an atomic write
    ///
    /// Writes to a temporary file in the same directory, then persists it
    /// over `config.json` so a crash mid-write never leaves a torn file.
    pub fn save(config: &WatchConfig) -> Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let json = serde_json::to_string_pretty(config)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&config_dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file
            .persist(Self::config_path())
            .map_err(|e| SeatWatchError::Io(e.error))?;

        info!("Configuration saved");
        Ok(())
    }
}

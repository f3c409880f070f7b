//! Configuration data models
//!
//! This module defines the data structures used for the watcher configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SeatWatchError, StringError};

/// The course page being watched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPage {
    /// URL of the course listing page
    pub url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

/// Class-attribute substrings signalling each seat status
///
/// The defaults are the tooltip classes the monitored registration system
/// renders next to each course listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMarkers {
    /// Marker present when seats are open
    pub open_marker: String,
    /// Marker present when seats are closed
    pub closed_marker: String,
}

impl StatusMarkers {
    /// Validate that the markers can disambiguate a document.
    ///
    /// Empty or identical markers would classify every page the same way,
    /// so they are rejected up front rather than mid-loop.
    pub fn validate(&self) -> Result<()> {
        if self.open_marker.trim().is_empty() || self.closed_marker.trim().is_empty() {
            return Err(SeatWatchError::ParseAmbiguous(
                "markers must be non-empty".to_string(),
            ));
        }
        if self.open_marker.eq_ignore_ascii_case(&self.closed_marker) {
            return Err(SeatWatchError::ParseAmbiguous(format!(
                "open and closed markers are identical: {}",
                self.open_marker
            )));
        }
        Ok(())
    }
}

/// Mail submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Mail submission host
    pub smtp_host: String,
    /// Submission port (STARTTLS upgrade)
    pub smtp_port: u16,
    /// Sender address, also used as the SMTP username
    pub sender: String,
    /// Recipient address
    pub recipient: String,
    /// App password for the sender account. Prefer the
    /// `SEATWATCH_SMTP_PASSWORD` environment variable over storing it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Subject line of the notification mail
    pub subject: String,
}

/// Polling schedule for the watcher loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingPolicy {
    /// Seconds between polls
    pub interval_secs: u64,
    /// Stop after this many polls. `None` polls until seats open.
    #[serde(default)]
    pub max_attempts: Option<u64>,
    /// Multiply the interval by this factor after every inconclusive poll
    #[serde(default)]
    pub backoff_factor: Option<f64>,
    /// Upper bound on the backed-off interval, in seconds
    #[serde(default)]
    pub max_interval_secs: Option<u64>,
}

impl PollingPolicy {
    /// Initial interval between polls
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Next interval after an inconclusive poll.
    ///
    /// With no backoff factor the interval is fixed. With one, the interval
    /// grows geometrically, clamped at `max_interval_secs` when set.
    #[expect(
        clippy::cast_precision_loss,
        reason = "interval caps are small values far below f64 integer precision"
    )]
    pub fn next_interval(&self, current: Duration) -> Duration {
        let Some(factor) = self.backoff_factor else {
            return current;
        };
        let mut scaled = current.as_secs_f64() * factor;
        if let Some(cap) = self.max_interval_secs {
            scaled = scaled.min(cap as f64);
        }
        Duration::from_secs_f64(scaled.max(0.0))
    }
}

/// Top-level watcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Page to poll
    pub target: TargetPage,
    /// Status markers to search for
    pub markers: StatusMarkers,
    /// Notification mail settings
    pub email: EmailConfig,
    /// Polling schedule
    pub polling: PollingPolicy,
}

impl WatchConfig {
    /// Validate the configuration before the watcher starts.
    ///
    /// The defaults deliberately leave the target URL and addresses empty so
    /// a fresh install fails fast here instead of polling nowhere.
    pub fn validate(&self) -> Result<()> {
        if self.target.url.trim().is_empty() {
            return Err(SeatWatchError::Config(StringError::new(
                "target.url is not set",
            )));
        }
        self.markers.validate()?;
        if self.email.sender.trim().is_empty() || self.email.recipient.trim().is_empty() {
            return Err(SeatWatchError::Config(StringError::new(
                "email.sender and email.recipient are required",
            )));
        }
        if self.email.password.as_deref().is_none_or(str::is_empty) {
            return Err(SeatWatchError::Config(StringError::new(
                "no SMTP password: set SEATWATCH_SMTP_PASSWORD or email.password",
            )));
        }
        Ok(())
    }
}

impl Default for TargetPage {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl Default for StatusMarkers {
    fn default() -> Self {
        Self {
            open_marker: "open-status-open-tt".to_string(),
            closed_marker: "open-status-closed-tt".to_string(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            sender: String::new(),
            recipient: String::new(),
            password: None,
            subject: "Seat notification: there are open seats".to_string(),
        }
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            max_attempts: None,
            backoff_factor: None,
            max_interval_secs: None,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            target: TargetPage::default(),
            markers: StatusMarkers::default(),
            email: EmailConfig::default(),
            polling: PollingPolicy::default(),
        }
    }
}

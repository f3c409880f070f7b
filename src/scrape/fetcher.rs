//! Course page fetching
//!
//! Issues one blocking HTTP GET per poll cycle. A transport failure or a
//! non-2xx response surfaces as a transport error; the caller decides whether
//! that ends the run (it never does — the watcher treats it as an
//! inconclusive poll and retries on the next cycle).

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::TargetPage;
use crate::error::{Result, SeatWatchError, StringError};

/// Blocking fetcher for the watched course page
pub struct PageFetcher {
    url: String,
    client: reqwest::blocking::Client,
}

impl PageFetcher {
    /// Create a fetcher for the configured target page
    ///
    /// The client carries an explicit request timeout so a stalled server
    /// cannot wedge the poll loop indefinitely.
    pub fn new(target: &TargetPage) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(target.timeout_secs))
            .user_agent(concat!("seatwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                warn!("Failed to create HTTP client: {}", e);
                SeatWatchError::Transport(Box::new(e))
            })?;

        Ok(Self {
            url: target.url.clone(),
            client,
        })
    }

    /// Fetch the raw HTML of the course page
    ///
    /// Exactly one GET, no retry at this layer. Non-2xx responses never
    /// yield a body to parse.
    pub fn fetch(&self) -> Result<String> {
        debug!("Fetching course page: {}", self.url);

        let response = self.client.get(&self.url).send().map_err(|e| {
            warn!("Failed to fetch course page: {}", e);
            SeatWatchError::Transport(Box::new(e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Course page returned error status: {}", status);
            return Err(SeatWatchError::Transport(StringError::new(format!(
                "course page returned HTTP status {status}"
            ))));
        }

        response.text().map_err(|e| {
            warn!("Failed to read course page body: {}", e);
            SeatWatchError::Transport(Box::new(e))
        })
    }
}

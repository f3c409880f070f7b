//! Watcher loop module
//!
//! This module drives the poll–extract–decide cycle as an explicit finite
//! state machine.
//!
//! # Overview
//!
//! The watcher provides:
//! - **Fixed-interval polling** of the course page through a `PageSource`
//! - **Transition detection** on the scraped `Status`
//! - **One-shot notification** the first time seats open, then termination
//! - **Deterministic testing** via injectable clock and source seams
//!
//! # State machine
//!
//! Two states, `Polling` and `Done`:
//! - `Polling -> Polling` when the poll reads Closed or Unknown (a fetch
//!   error counts as Unknown); the clock sleeps out the policy interval
//!   before the next cycle
//! - `Polling -> Done` when the poll reads Open; the notifier fires exactly
//!   once and the run terminates whatever the delivery outcome was
//! - `Polling -> Done` when the policy carries an attempt bound and it is
//!   reached; the default policy carries none and polls until seats open or
//!   the process is killed
//!
//! `Done` is terminal. There is no cancellation token; a transient and a
//! permanent fetch failure look identical to the loop and both self-heal by
//! waiting for the next cycle.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::{PollingPolicy, StatusMarkers};
use crate::error::Result;
use crate::notify::Notifier;
use crate::scrape::{PageFetcher, Status, extract_status};

/// Source of course page documents, one per poll cycle
pub trait PageSource {
    /// Fetch the raw HTML for the current cycle
    fn fetch_page(&mut self) -> Result<String>;
}

impl PageSource for PageFetcher {
    fn fetch_page(&mut self) -> Result<String> {
        self.fetch()
    }
}

/// Clock abstraction for the inter-poll delay
///
/// Production uses `SystemClock`; tests inject a virtual clock so many polls
/// run without wall-clock time passing.
pub trait Clock {
    /// Block for the given duration
    fn sleep(&mut self, duration: Duration);
}

/// Clock backed by `std::thread::sleep`
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Watcher states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Fetching and classifying the page on each cycle
    Polling,
    /// Terminal; the notification attempt has happened or the attempt bound hit
    Done,
}

/// Terminal outcome of a watcher run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Seats opened; `notified` records whether the mail actually went out
    SeatsOpen {
        /// True when the notifier reported successful delivery
        notified: bool,
    },
    /// The polling policy's attempt bound was reached before seats opened
    AttemptsExhausted,
}

/// The course seat watcher
///
/// Generic over its page source, notifier, and clock so every collaborator
/// can be substituted in tests. One instance performs one run; nothing is
/// persisted across runs.
pub struct StatusWatcher<S, N, C> {
    source: S,
    notifier: N,
    clock: C,
    markers: StatusMarkers,
    policy: PollingPolicy,
    state: WatcherState,
}

impl<S: PageSource, N: Notifier, C: Clock> StatusWatcher<S, N, C> {
    /// Create a watcher in the `Polling` state
    pub fn new(
        source: S,
        notifier: N,
        clock: C,
        markers: StatusMarkers,
        policy: PollingPolicy,
    ) -> Self {
        Self {
            source,
            notifier,
            clock,
            markers,
            policy,
            state: WatcherState::Polling,
        }
    }

    /// Current state of the watcher
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// One fetch–extract cycle
    ///
    /// A fetch failure is logged and read as `Unknown`: the next cycle is the
    /// retry policy. One status line per poll, success or not.
    fn poll_once(&mut self) -> Status {
        let status = match self.source.fetch_page() {
            Ok(html) => extract_status(&html, &self.markers),
            Err(e) => {
                warn!("Poll failed: {}", e);
                Status::Unknown
            }
        };
        info!("Current course status: {}", status);
        status
    }

    /// Drive the state machine to its terminal state
    ///
    /// Returns the terminal outcome. The notifier fires at most once per run,
    /// and its failure never propagates — the run terminates either way.
    pub fn run(&mut self) -> RunOutcome {
        let mut interval = self.policy.interval();
        let mut attempts: u64 = 0;

        while self.state == WatcherState::Polling {
            let status = self.poll_once();
            attempts += 1;

            if status == Status::Open {
                info!("Open seats detected after {} poll(s)", attempts);
                let notified = match self.notifier.notify() {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Failed to send notification: {}", e);
                        false
                    }
                };
                self.state = WatcherState::Done;
                return RunOutcome::SeatsOpen { notified };
            }

            if let Some(max) = self.policy.max_attempts
                && attempts >= max
            {
                warn!("Attempt bound of {} reached without open seats", max);
                self.state = WatcherState::Done;
                return RunOutcome::AttemptsExhausted;
            }

            self.clock.sleep(interval);
            interval = self.policy.next_interval(interval);
        }

        // Unreachable for a freshly constructed watcher; a finished one has
        // nothing left to do.
        RunOutcome::AttemptsExhausted
    }
}

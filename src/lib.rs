//! seatwatch - course seat-availability watcher
//!
//! Polls a single course-listing page, scrapes the open/closed seat
//! indicator from its markup, sends one notification email when the status
//! transitions to open, and exits. Strictly single-threaded and blocking:
//! fetch -> extract -> compare -> (notify | wait) -> repeat, with the
//! inter-poll sleep as the only suspension point.
//!
//! The crate is a library plus a thin binary so every collaborator (page
//! source, notifier, clock) can be substituted in tests.

// Module declarations
pub mod config;
pub mod error;
pub mod notify;
pub mod scrape;
pub mod utils;
pub mod watcher;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, SeatWatchError};
pub use scrape::Status;
pub use watcher::{RunOutcome, StatusWatcher, WatcherState};

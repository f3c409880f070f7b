//! Course page scraping module
//!
//! This module fetches the watched course page and derives a seat status
//! from its markup.
//!
//! # Overview
//!
//! One poll cycle uses the two halves of this module in sequence:
//! - `PageFetcher` performs a single blocking GET with a timeout and maps
//!   transport failures and non-2xx responses to `SeatWatchError::Transport`
//! - `extract_status` scans the returned document for the configured open
//!   and closed markers and yields a `Status`
//!
//! Extraction is deliberately a substring scan rather than a DOM walk: the
//! markers are stable tooltip class names, and the listing markup offers no
//! structural guarantees worth validating. Open-marker priority applies when
//! a document somehow carries both markers.

pub mod fetcher;
pub mod status;

pub use fetcher::PageFetcher;
pub use status::{Status, extract_status};

//! Seat status extraction
//!
//! Classifies a fetched course page by scanning the raw markup for the two
//! status markers. Marker matching is an ASCII case-insensitive substring
//! search over the document, the same way the site's tooltip classes appear
//! in the HTML. No structural validation is attempted; a page containing
//! neither marker is an inconclusive read, not an error.

use std::fmt;

use crate::config::StatusMarkers;

/// Seat availability derived from one poll of the course page
///
/// Derived transiently per poll; never persisted between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The open marker was found
    Open,
    /// The closed marker was found
    Closed,
    /// Neither marker was found, or the page could not be read
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => write!(f, "Open"),
            Status::Closed => write!(f, "Closed"),
            Status::Unknown => write!(f, "Unknown"),
        }
    }
}

/// ASCII-lowercase a string for case-insensitive marker search.
/// Non-ASCII characters pass through untouched.
fn to_ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Extract the seat status from a course page document
///
/// Pure function over the document text: the open marker wins when present,
/// the closed marker is checked second, and a document with neither yields
/// `Status::Unknown`. Open-marker priority matters when a page carries both
/// markers (the open check runs first).
pub fn extract_status(html: &str, markers: &StatusMarkers) -> Status {
    let doc = to_ascii_lower(html);

    if doc.contains(&to_ascii_lower(&markers.open_marker)) {
        Status::Open
    } else if doc.contains(&to_ascii_lower(&markers.closed_marker)) {
        Status::Closed
    } else {
        Status::Unknown
    }
}

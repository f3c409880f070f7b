//! Integration tests for seatwatch
//!
//! Exercises the full fetch–extract–decide cycle against a loopback HTTP
//! server, configuration persistence, and the fire-and-forget notification
//! contract, all through the public library API.

use seatwatch::config::{PollingPolicy, StatusMarkers, WatchConfig};
use seatwatch::error::{Result, SeatWatchError, StringError};
use seatwatch::notify::Notifier;
use seatwatch::scrape::{PageFetcher, Status, extract_status};
use seatwatch::watcher::{Clock, RunOutcome, StatusWatcher, WatcherState};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

const OPEN_SNIPPET: &str = r#"<span class="tooltip-iws open-status-open-tt">Open</span>"#;
const CLOSED_SNIPPET: &str = r#"<span class="tooltip-iws open-status-closed-tt">Closed</span>"#;

/// Clock that counts sleep requests without waiting, so many poll cycles run
/// in test time.
struct NoWaitClock {
    sleeps: Arc<AtomicUsize>,
}

impl Clock for NoWaitClock {
    fn sleep(&mut self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier double recording invocations; optionally fails every delivery.
struct RecordingNotifier {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl Notifier for RecordingNotifier {
    fn notify(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(SeatWatchError::Delivery(StringError::new(
                "mail server unreachable",
            )))
        } else {
            Ok(())
        }
    }
}

/// Serve one canned HTML page per connection, in order, on a loopback socket.
fn serve_pages(pages: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for page in pages {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                page.len(),
                page
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/")
}

fn course_page(snippet: &str) -> String {
    format!("<html><body><table><tr><td>CS 101</td><td>{snippet}</td></tr></table></body></html>")
}

/// The full pipeline against a real HTTP round trip: two closed polls, then
/// an open one, one notification, termination.
#[test]
fn test_watcher_end_to_end_over_http() {
    let url = serve_pages(vec![
        course_page(CLOSED_SNIPPET),
        course_page(CLOSED_SNIPPET),
        course_page(OPEN_SNIPPET),
    ]);

    let mut config = WatchConfig::default();
    config.target.url = url;
    config.target.timeout_secs = 5;

    let fetcher = PageFetcher::new(&config.target).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let sleeps = Arc::new(AtomicUsize::new(0));
    let mut watcher = StatusWatcher::new(
        fetcher,
        RecordingNotifier {
            calls: Arc::clone(&calls),
            fail: false,
        },
        NoWaitClock {
            sleeps: Arc::clone(&sleeps),
        },
        StatusMarkers::default(),
        PollingPolicy::default(),
    );

    let outcome = watcher.run();

    assert_eq!(outcome, RunOutcome::SeatsOpen { notified: true });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(sleeps.load(Ordering::SeqCst), 2);
    assert_eq!(watcher.state(), WatcherState::Done);
}

/// A dead mail transport never stops the run from reaching its exit step.
#[test]
fn test_failed_delivery_still_reaches_the_exit_step() {
    let url = serve_pages(vec![course_page(OPEN_SNIPPET)]);

    let mut config = WatchConfig::default();
    config.target.url = url;
    config.target.timeout_secs = 5;

    let fetcher = PageFetcher::new(&config.target).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut watcher = StatusWatcher::new(
        fetcher,
        RecordingNotifier {
            calls: Arc::clone(&calls),
            fail: true,
        },
        NoWaitClock {
            sleeps: Arc::new(AtomicUsize::new(0)),
        },
        StatusMarkers::default(),
        PollingPolicy::default(),
    );

    let outcome = watcher.run();

    assert_eq!(outcome, RunOutcome::SeatsOpen { notified: false });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(watcher.state(), WatcherState::Done);
}

/// An unreachable page reads as Unknown cycle after cycle; with a harness
/// attempt bound the run ends without ever notifying.
#[test]
fn test_unreachable_page_polls_until_attempt_bound() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = WatchConfig::default();
    config.target.url = format!("http://{addr}/");
    config.target.timeout_secs = 1;
    config.polling.max_attempts = Some(3);

    let fetcher = PageFetcher::new(&config.target).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut watcher = StatusWatcher::new(
        fetcher,
        RecordingNotifier {
            calls: Arc::clone(&calls),
            fail: false,
        },
        NoWaitClock {
            sleeps: Arc::new(AtomicUsize::new(0)),
        },
        config.markers.clone(),
        config.polling.clone(),
    );

    let outcome = watcher.run();

    assert_eq!(outcome, RunOutcome::AttemptsExhausted);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

/// Extraction over a realistic listing table, not just bare markers.
#[test]
fn test_extraction_on_realistic_listing_markup() {
    let markers = StatusMarkers::default();

    let open = course_page(OPEN_SNIPPET);
    let closed = course_page(CLOSED_SNIPPET);
    let unavailable = "<html><body><p>System maintenance in progress</p></body></html>";

    assert_eq!(extract_status(&open, &markers), Status::Open);
    assert_eq!(extract_status(&closed, &markers), Status::Closed);
    assert_eq!(extract_status(unavailable, &markers), Status::Unknown);
}

/// Configuration survives a save/load round trip through JSON on disk.
#[test]
fn test_config_persistence_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.json");

    let mut config = WatchConfig::default();
    config.target.url = "https://courses.example.edu/mpsis/cs101".to_string();
    config.polling.interval_secs = 30;
    config.polling.backoff_factor = Some(1.5);
    config.email.sender = "watcher@example.com".to_string();
    config.email.recipient = "student@example.com".to_string();

    let json = serde_json::to_string_pretty(&config).unwrap();
    std::fs::write(&config_path, json).unwrap();

    let loaded: WatchConfig =
        serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();

    assert_eq!(loaded.target.url, "https://courses.example.edu/mpsis/cs101");
    assert_eq!(loaded.polling.interval_secs, 30);
    assert_eq!(loaded.polling.backoff_factor, Some(1.5));
    assert_eq!(loaded.email.recipient, "student@example.com");
}

#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for seatwatch unit tests.
//!
//! Several tests point the config directory at a throwaway location via the
//! `SEATWATCH_DIR` environment variable. Environment mutation is process-wide,
//! so a global lock serializes those tests while the rest of the suite runs in
//! parallel. Only compiled during testing.

use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex serializing tests that modify seatwatch environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Helper function to create a temporary test directory using tempfile.
/// Returns a `TempDir` that automatically cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// RAII guard that points `SEATWATCH_DIR` at a test directory and restores
/// the original value when dropped.
///
/// Holds the global env lock for its lifetime: each test gets its own
/// `TempDir`, the original value is restored on drop (panic included), and
/// the lock keeps concurrent tests from interleaving their mutations.
pub struct SeatwatchDirGuard {
    original: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only environment mutation, serialized by ENV_LOCK and restored on drop"
)]
impl SeatwatchDirGuard {
    /// Create a new guard that sets `SEATWATCH_DIR` to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = ENV_LOCK.lock().unwrap();

        let original = std::env::var(crate::config::DIR_ENV_VAR).ok();
        // SAFETY: mutation is serialized by ENV_LOCK and undone on drop; no
        // other test reads this variable without holding the same lock.
        unsafe {
            std::env::set_var(crate::config::DIR_ENV_VAR, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only environment restoration with the lock still held"
)]
impl Drop for SeatwatchDirGuard {
    fn drop(&mut self) {
        // SAFETY: still holding ENV_LOCK; restoring the pre-test state.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(crate::config::DIR_ENV_VAR, original);
            }
        } else {
            unsafe {
                std::env::remove_var(crate::config::DIR_ENV_VAR);
            }
        }
    }
}

/// RAII guard for an arbitrary environment variable, restored on drop.
///
/// Use only while a `SeatwatchDirGuard` is alive (it owns the env lock), or
/// in a test that touches no other environment-dependent code.
pub struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
}

#[expect(
    unsafe_code,
    reason = "Test-only environment mutation restored on drop"
)]
impl EnvVarGuard {
    /// Set `key` to `value` for the guard's lifetime.
    pub fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: callers hold the env lock through SeatwatchDirGuard; the
        // original value is restored on drop.
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, original }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only environment restoration"
)]
impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // SAFETY: same invariants as EnvVarGuard::set.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(self.key, original);
            }
        } else {
            unsafe {
                std::env::remove_var(self.key);
            }
        }
    }
}

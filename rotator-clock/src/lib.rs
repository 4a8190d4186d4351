//! Time source for archive rotation.
//!
//! Rotated archives carry a timestamp in their file name. The rotation code
//! never reads the system time directly; it asks a [`Clock`], so tests can pin
//! the timestamp and assert exact output names.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current Unix timestamp.
pub trait Clock: Send + Sync {
    /// Returns the current time as Unix seconds since epoch.
    fn now_unix_sec(&self) -> u64;
}

/// Wall clock backed by [`SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_sec(&self) -> u64 {
        // A clock set before 1970 is reported as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct MockClock {
    timestamp: u64,
}

impl MockClock {
    /// Create a clock that always reports `timestamp`.
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl Clock for MockClock {
    fn now_unix_sec(&self) -> u64 {
        self.timestamp
    }
}

/// Clock that moves forward by a fixed step every time it is read.
///
/// Handy when a test rotates the same archive many times and wants each
/// rotated file to carry a distinct timestamp.
#[derive(Debug)]
pub struct AdvancingClock {
    timestamp: AtomicU64,
    step: u64,
}

impl AdvancingClock {
    /// Start at `timestamp`, advancing by `step` seconds per read.
    pub fn new(timestamp: u64, step: u64) -> Self {
        Self {
            timestamp: AtomicU64::new(timestamp),
            step,
        }
    }
}

impl Clock for AdvancingClock {
    fn now_unix_sec(&self) -> u64 {
        self.timestamp.fetch_add(self.step, Ordering::SeqCst)
    }
}

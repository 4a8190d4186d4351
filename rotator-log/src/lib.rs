//! Logging capability passed into every rotation component.
//!
//! There is no process-wide logger. Callers build one [`Logger`] at startup
//! (normally a [`StderrLogger`] at the verbosity chosen with `-v`) and hand a
//! reference to whatever needs to report progress. Tests use [`MockLogger`] to
//! assert on what would have been printed.

use std::io::Write;
use std::sync::{Arc, RwLock};

/// How chatty the rotator is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Normal,
    /// Progress messages (`-v`).
    Verbose,
    /// Per-file scan details (`-vv`).
    Debug,
}

impl Verbosity {
    /// Map the number of `-v` flags to a level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Sink for log messages.
pub trait Logger: Send + Sync {
    /// Record `message` at `level`.
    fn log(&self, level: Verbosity, message: &str);

    /// Always-visible message.
    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    /// Message shown with `-v`.
    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    /// Message shown with `-vv`.
    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Writes messages at or below the configured level to stderr.
///
/// Stdout is left free for the rotation summary, which may be JSON.
#[derive(Debug, Clone, Copy)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }

    /// Level this logger filters at.
    pub fn level(&self) -> Verbosity {
        self.level
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr(), "{}", message);
        }
    }
}

/// A captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Logger that records every message regardless of level.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far, in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Message text only.
    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }

    /// Messages logged at exactly `level`.
    pub fn messages_at_level(&self, level: Verbosity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    /// True if any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|e| e.message.contains(needle))
    }

    pub fn count(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}

/// Logger that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}
}

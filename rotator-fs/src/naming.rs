//! Naming convention for rotated archives.
//!
//! A rotated archive is named
//! `<base>.<YYYY-MM-DD-HHMMSS>.backup-<rotation id><extension>`, for example
//! `mydump.2012-12-20-133640.backup-7.tar.gz`. The rotation id embedded in
//! the name is the only state the rotator keeps.

use std::sync::LazyLock;

use chrono::{TimeZone, Utc};
use glob::Pattern;
use regex::Regex;
use rotator_slots::RotationId;

/// Glob appended to the base name to find candidate archives.
pub const ROTATED_GLOB: &str = "*.backup-*";

/// Marker preceding the rotation id.
pub const ROTATION_MARKER: &str = "backup-";

/// `chrono` format of the timestamp embedded in rotated names.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

static ROTATION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"backup-(\d+)").expect("rotation id regex is valid"));

/// Render a Unix timestamp (UTC) in the rotated-name format.
pub fn format_timestamp(ts_unix: u64) -> String {
    i64::try_from(ts_unix)
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| ts_unix.to_string())
}

/// File name for archive `base` rotated at `ts_unix` with `rotation_id`.
pub fn rotated_file_name(base: &str, ts_unix: u64, rotation_id: RotationId, ext: &str) -> String {
    format!(
        "{}.{}.{}{}{}",
        base,
        format_timestamp(ts_unix),
        ROTATION_MARKER,
        rotation_id,
        ext
    )
}

/// Rotation id embedded in a file name.
///
/// When the marker appears more than once the last occurrence wins, so a base
/// name that itself contains `backup-N` does not shadow the real id. Returns
/// `None` when there is no marker or the id does not fit in a `u64`.
pub fn parse_rotation_id(file_name: &str) -> Option<RotationId> {
    ROTATION_ID
        .captures_iter(file_name)
        .last()
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Recognizes rotated archives belonging to one base name.
#[derive(Debug, Clone)]
pub struct RotatedNameMatcher {
    pattern: Pattern,
}

impl RotatedNameMatcher {
    /// Matcher for `<base>*.backup-*`. Glob metacharacters in `base` are
    /// matched literally.
    pub fn new(base: &str) -> Result<Self, glob::PatternError> {
        let pattern = Pattern::new(&format!("{}{}", Pattern::escape(base), ROTATED_GLOB))?;
        Ok(Self { pattern })
    }

    /// Rotation id of `file_name` if it is one of this base's archives.
    pub fn rotation_id(&self, file_name: &str) -> Option<RotationId> {
        if !self.pattern.matches(file_name) {
            return None;
        }
        parse_rotation_id(file_name)
    }
}

//! Summary of a rotate command, printed on stdout.
//!
//! The text form stays silent for a completed or skipped rotation so the
//! binary can run from cron without producing mail; progress goes to the
//! stderr logger instead. A dry run always prints its plan. The JSON form is
//! printed for every outcome.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::commands::RotateResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Rotated,
    DryRun,
    Skipped,
}

/// A displaced archive that could not be removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRemoval {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationSummary {
    pub status: Status,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u64>,
    /// Removed archives, or for a dry run the ones that would be removed.
    pub removed: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_removals: Vec<FailedRemoval>,
}

impl From<&RotateResult> for RotationSummary {
    fn from(result: &RotateResult) -> Self {
        match result {
            RotateResult::Skipped { path } => Self {
                status: Status::Skipped,
                source: path.display().to_string(),
                destination: None,
                rotation_id: None,
                slot: None,
                removed: Vec::new(),
                failed_removals: Vec::new(),
            },
            RotateResult::Planned(plan) => Self {
                status: Status::DryRun,
                source: plan.source.display().to_string(),
                destination: Some(plan.destination.display().to_string()),
                rotation_id: Some(plan.rotation_id),
                slot: Some(plan.slot),
                removed: plan.to_delete.iter().map(|p| p.display().to_string()).collect(),
                failed_removals: Vec::new(),
            },
            RotateResult::Rotated(outcome) => Self {
                status: Status::Rotated,
                source: outcome.source.display().to_string(),
                destination: Some(outcome.destination.display().to_string()),
                rotation_id: Some(outcome.rotation_id),
                slot: Some(outcome.slot),
                removed: outcome.removed.iter().map(|p| p.display().to_string()).collect(),
                failed_removals: outcome
                    .failed_removals
                    .iter()
                    .map(|f| FailedRemoval {
                        path: f.path.display().to_string(),
                        error: f.error.to_string(),
                    })
                    .collect(),
            },
        }
    }
}

impl RotationSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable plan of a dry run; `None` for other outcomes.
    pub fn to_text(&self) -> Option<String> {
        if self.status != Status::DryRun {
            return None;
        }

        let mut text = format!(
            "Would move {} to {}",
            self.source,
            self.destination.as_deref().unwrap_or_default()
        );
        if let (Some(id), Some(slot)) = (self.rotation_id, self.slot) {
            text.push_str(&format!(" (rotation id {}, slot {})", id, slot));
        }
        for path in &self.removed {
            text.push_str(&format!("\nWould remove {}", path));
        }
        Some(text)
    }

    /// Render in `format`; `None` means print nothing.
    pub fn render(&self, format: OutputFormat) -> Result<Option<String>, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json().map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotator_fs::{FsError, RemovalFailure, RotationOutcome, RotationPlan};
    use std::path::PathBuf;

    fn planned() -> RotateResult {
        RotateResult::Planned(RotationPlan {
            rotation_id: 4,
            slot: 1,
            source: PathBuf::from("/b/dump.tgz"),
            destination: PathBuf::from("/b/dump.tgz.2012-12-20-103640.backup-4"),
            existing: Vec::new(),
            to_delete: vec![PathBuf::from("/b/dump.tgz.2012-12-19-103640.backup-1")],
        })
    }

    fn rotated() -> RotateResult {
        RotateResult::Rotated(RotationOutcome {
            rotation_id: 4,
            slot: 1,
            source: PathBuf::from("/b/dump.tgz"),
            destination: PathBuf::from("/b/dump.tgz.2012-12-20-103640.backup-4"),
            removed: Vec::new(),
            failed_removals: vec![RemovalFailure {
                path: PathBuf::from("/b/dump.tgz.2012-12-19-103640.backup-1"),
                error: FsError::Path("locked".into()),
            }],
        })
    }

    // --- Text ---

    #[test]
    fn test_text_for_dry_run() {
        let summary = RotationSummary::from(&planned());
        assert_eq!(
            summary.to_text().unwrap(),
            "Would move /b/dump.tgz to /b/dump.tgz.2012-12-20-103640.backup-4 (rotation id 4, slot 1)\n\
             Would remove /b/dump.tgz.2012-12-19-103640.backup-1"
        );
    }

    #[test]
    fn test_text_is_silent_otherwise() {
        assert_eq!(RotationSummary::from(&rotated()).to_text(), None);
        let skipped = RotateResult::Skipped {
            path: PathBuf::from("/b/dump.tgz"),
        };
        assert_eq!(RotationSummary::from(&skipped).to_text(), None);
    }

    // --- JSON ---

    #[test]
    fn test_json_for_rotation() {
        let json = RotationSummary::from(&rotated()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "rotated");
        assert_eq!(value["rotation_id"], 4);
        assert_eq!(value["slot"], 1);
        assert_eq!(value["removed"], serde_json::json!([]));
        assert_eq!(value["failed_removals"][0]["error"], "path error: locked");
    }

    #[test]
    fn test_json_for_skipped_omits_rotation_fields() {
        let skipped = RotateResult::Skipped {
            path: PathBuf::from("/b/dump.tgz"),
        };
        let json = RotationSummary::from(&skipped).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "skipped");
        assert_eq!(value["source"], "/b/dump.tgz");
        assert!(value.get("destination").is_none());
        assert!(value.get("rotation_id").is_none());
        assert!(value.get("failed_removals").is_none());
    }

    #[test]
    fn test_render_json_always_prints() {
        let summary = RotationSummary::from(&planned());
        let rendered = summary.render(OutputFormat::Json).unwrap().unwrap();
        assert!(rendered.contains("\"status\": \"dry_run\""));
    }
}

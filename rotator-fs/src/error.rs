//! Errors from resolving paths and rotating archives.

use std::path::PathBuf;

use rotator_slots::RotationId;
use thiserror::Error;

use crate::filesystem::FsError;

/// Why a rotation could not be carried out.
///
/// Everything except [`RotationError::Move`] is raised before the filesystem
/// is modified.
#[derive(Debug, Error)]
pub enum RotationError {
    #[error("specified file ({}) not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("invalid input path {}: {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: &'static str },

    #[error("file extension must start with the . character, got {0:?}")]
    InvalidExtension(String),

    #[error("the file {} does not have the file extension {ext}", .path.display())]
    ExtensionMismatch { path: PathBuf, ext: String },

    #[error("destination directory ({}) is not found or is not a directory", .0.display())]
    DestinationNotFound(PathBuf),

    #[error("failed to scan {} for rotated archives: {source}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("no rotation id left after {0}")]
    IdsExhausted(RotationId),

    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: FsError,
    },
}

/// A rotated archive that could not be removed.
///
/// Removal failures never abort a rotation: by the time they happen the new
/// archive is already in place.
#[derive(Debug)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub error: FsError,
}

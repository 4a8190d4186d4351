//! Filesystem side of archive rotation.
//!
//! This crate provides:
//! - Filesystem trait with a real and an in-memory implementation
//! - The rotated-archive naming convention and rotation id parsing
//! - Path resolution for the input archive and its destination
//! - Rotation planning and application
//!
//! # Concurrency
//!
//! All rotation state is rebuilt from the directory listing on each run and
//! no lock is taken. Two overlapping runs on the same archive name can pick
//! the same next id, so callers must serialize runs per archive name.

pub mod error;
pub mod filesystem;
pub mod naming;
pub mod paths;
pub mod rotation;
pub mod scan;

pub use error::{RemovalFailure, RotationError};
pub use filesystem::{Filesystem, FsError, MockFilesystem, RealFilesystem};
pub use naming::{format_timestamp, parse_rotation_id, rotated_file_name, RotatedNameMatcher};
pub use paths::PathSpec;
pub use rotation::{
    apply_plan, check_destination, check_input, plan_rotation, rotate, rotation_set,
    RotationOutcome, RotationPlan, SlottedFile,
};
pub use scan::{next_rotation_id, scan_rotated_files, RotatedFile};

//! Rotating one archive into its set of rotated copies.
//!
//! A rotation is split into a pure planning step and an apply step:
//!
//! - [`plan_rotation`] validates the input, scans the output directory, and
//!   decides the new rotation id, its slot, the new file name, and which
//!   existing archives share that slot. Nothing is modified.
//! - [`apply_plan`] renames the input into place and only then removes the
//!   displaced archives, so a crash in between leaves an extra file rather
//!   than a missing one.
//!
//! [`rotate`] runs both and reports the resulting rotation set.
//!
//! # Concurrency
//!
//! No lock is taken. Rotation state is rebuilt from the directory listing on
//! every run, so two overlapping runs on the same archive name can read the
//! same listing and pick the same next id. Callers must serialize runs per
//! archive name.

use std::path::{Path, PathBuf};

use rotator_clock::Clock;
use rotator_log::Logger;
use rotator_slots::{RotationId, Slot, SlotAssigner};

use crate::error::{RemovalFailure, RotationError};
use crate::filesystem::Filesystem;
use crate::paths::PathSpec;
use crate::scan::{next_rotation_id, scan_rotated_files, RotatedFile};

/// Everything a rotation will do, decided up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPlan {
    pub rotation_id: RotationId,
    pub slot: Slot,
    /// Archive being rotated in.
    pub source: PathBuf,
    /// Name it is renamed to.
    pub destination: PathBuf,
    /// Rotated archives found before the rotation, oldest first.
    pub existing: Vec<RotatedFile>,
    /// Existing archives in `slot`, removed after the rename.
    pub to_delete: Vec<PathBuf>,
}

/// What a rotation actually did.
#[derive(Debug)]
pub struct RotationOutcome {
    pub rotation_id: RotationId,
    pub slot: Slot,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub removed: Vec<PathBuf>,
    pub failed_removals: Vec<RemovalFailure>,
}

impl RotationOutcome {
    /// True when every displaced archive was removed.
    pub fn is_clean(&self) -> bool {
        self.failed_removals.is_empty()
    }
}

/// A rotated archive together with the slot it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlottedFile {
    pub file: RotatedFile,
    pub slot: Slot,
}

/// Ensure `path` names an existing regular file.
pub fn check_input<F>(fs: &F, path: &Path) -> Result<(), RotationError>
where
    F: Filesystem + ?Sized,
{
    if fs.is_dir(path) {
        return Err(RotationError::InvalidPath {
            path: path.to_path_buf(),
            reason: "is a directory, but must be a file",
        });
    }
    if !fs.is_file(path) {
        return Err(RotationError::InputNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// Ensure rotated archives can be written to `dir`.
///
/// An empty path stands for the working directory and always passes.
pub fn check_destination<F>(fs: &F, dir: &Path) -> Result<(), RotationError>
where
    F: Filesystem + ?Sized,
{
    if dir.as_os_str().is_empty() || fs.is_dir(dir) {
        Ok(())
    } else {
        Err(RotationError::DestinationNotFound(dir.to_path_buf()))
    }
}

/// Decide what rotating `paths` would do, without touching the filesystem.
///
/// # Concurrency
///
/// The next id is derived from the current listing of the output directory.
/// A plan computed while another run on the same archive name is in flight
/// can reuse that run's id; callers must serialize runs per archive name.
pub fn plan_rotation<F, A, C>(
    fs: &F,
    algorithm: &A,
    paths: &PathSpec,
    clock: &C,
) -> Result<RotationPlan, RotationError>
where
    F: Filesystem + ?Sized,
    A: SlotAssigner + ?Sized,
    C: Clock + ?Sized,
{
    let source = paths.input_path();
    check_input(fs, &source)?;
    check_destination(fs, paths.output_dir())?;

    let existing = scan_rotated_files(fs, paths)?;
    let rotation_id = next_rotation_id(&existing)?;
    let slot = algorithm.id_to_slot(rotation_id);

    let to_delete = existing
        .iter()
        .filter(|f| algorithm.id_to_slot(f.rotation_id) == slot)
        .map(|f| f.path.clone())
        .collect();

    Ok(RotationPlan {
        rotation_id,
        slot,
        source,
        destination: paths.output_path(rotation_id, clock.now_unix_sec()),
        existing,
        to_delete,
    })
}

/// Carry out `plan`: rename first, then remove the displaced archives.
///
/// A failed rename aborts before anything is removed. Failed removals are
/// logged and returned in the outcome.
pub fn apply_plan<F, L>(
    fs: &F,
    plan: &RotationPlan,
    logger: &L,
) -> Result<RotationOutcome, RotationError>
where
    F: Filesystem + ?Sized,
    L: Logger + ?Sized,
{
    fs.rename(&plan.source, &plan.destination)
        .map_err(|source| RotationError::Move {
            from: plan.source.clone(),
            to: plan.destination.clone(),
            source,
        })?;
    logger.verbose(&format!(
        "Moved {} to {}",
        plan.source.display(),
        plan.destination.display()
    ));

    let mut removed = Vec::new();
    let mut failed_removals = Vec::new();
    for path in &plan.to_delete {
        match fs.remove(path) {
            Ok(()) => {
                logger.verbose(&format!("Removed {}", path.display()));
                removed.push(path.clone());
            }
            Err(error) => {
                logger.info(&format!("Failed to remove {}: {}", path.display(), error));
                failed_removals.push(RemovalFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    Ok(RotationOutcome {
        rotation_id: plan.rotation_id,
        slot: plan.slot,
        source: plan.source.clone(),
        destination: plan.destination.clone(),
        removed,
        failed_removals,
    })
}

/// Rotated archives currently on disk with their slots, oldest first.
pub fn rotation_set<F, A>(
    fs: &F,
    algorithm: &A,
    paths: &PathSpec,
) -> Result<Vec<SlottedFile>, RotationError>
where
    F: Filesystem + ?Sized,
    A: SlotAssigner + ?Sized,
{
    Ok(scan_rotated_files(fs, paths)?
        .into_iter()
        .map(|file| SlottedFile {
            slot: algorithm.id_to_slot(file.rotation_id),
            file,
        })
        .collect())
}

/// Rotate the archive described by `paths` using `algorithm`.
///
/// # Concurrency
///
/// State is rebuilt from the directory listing, so two overlapping calls
/// for the same archive name can pick the same next id and overwrite or
/// delete each other's archives. The caller must serialize runs per archive
/// name.
pub fn rotate<F, C, L, A>(
    fs: &F,
    clock: &C,
    logger: &L,
    algorithm: &A,
    paths: &PathSpec,
) -> Result<RotationOutcome, RotationError>
where
    F: Filesystem + ?Sized,
    C: Clock + ?Sized,
    L: Logger + ?Sized,
    A: SlotAssigner + ?Sized,
{
    let plan = plan_rotation(fs, algorithm, paths, clock)?;

    for file in &plan.existing {
        logger.debug(&format!(
            "Found {} (rotation id {}, slot {})",
            file.path.display(),
            file.rotation_id,
            algorithm.id_to_slot(file.rotation_id)
        ));
    }
    logger.verbose(&format!(
        "New file: rotation_id={}, rotation_slot={}",
        plan.rotation_id, plan.slot
    ));

    let outcome = apply_plan(fs, &plan, logger)?;

    // The rotation has already happened; a failed listing only loses output.
    match rotation_set(fs, algorithm, paths) {
        Ok(set) => {
            logger.verbose("Current rotation set:");
            for entry in set {
                logger.verbose(&format!(
                    "- {} / slot id {}",
                    entry.file.path.display(),
                    entry.slot
                ));
            }
        }
        Err(e) => logger.info(&format!("Failed to list rotation set: {}", e)),
    }

    Ok(outcome)
}

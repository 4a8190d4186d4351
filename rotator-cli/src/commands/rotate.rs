//! Rotate command orchestration.
//!
//! Validates the arguments, builds the algorithm, and hands the input over to
//! `rotator_fs::rotate` (or only plans the rotation with `--dry-run`).

use std::path::PathBuf;

use rotator_clock::Clock;
use rotator_fs::{
    check_destination, check_input, plan_rotation, rotate, Filesystem, PathSpec, RotationError,
    RotationOutcome, RotationPlan,
};
use rotator_log::Logger;
use rotator_slots::{Algorithm, Slot, SlotAssigner};

use crate::cli::{Cli, CliError};

use super::CommandResult;

/// Slot layouts larger than this are summarized instead of listed.
pub const MAX_LISTED_SLOTS: u64 = 64;

/// Result of rotate command execution.
#[derive(Debug)]
pub enum RotateResult {
    /// The input was missing and `--ignore-missing` was given.
    Skipped { path: PathBuf },
    /// `--dry-run`: what would have happened.
    Planned(RotationPlan),
    /// The rotation was carried out.
    Rotated(RotationOutcome),
}

/// Execute the rotate command.
///
/// All argument and path validation happens before the filesystem is
/// modified.
pub fn execute_rotate<F, C, L>(
    args: &Cli,
    fs: &F,
    clock: &C,
    logger: &L,
) -> CommandResult<RotateResult>
where
    F: Filesystem,
    C: Clock,
    L: Logger,
{
    args.validate()?;
    let algorithm = args.algorithm_config().build().map_err(CliError::from)?;
    log_algorithm(&algorithm, logger);

    match check_input(fs, &args.path) {
        Ok(()) => {}
        Err(RotationError::InputNotFound(path)) if args.ignore_missing => {
            logger.verbose(&format!(
                "Specified file ({}) not found; exiting.",
                path.display()
            ));
            return Ok(RotateResult::Skipped { path });
        }
        Err(e) => return Err(e.into()),
    }

    let paths = PathSpec::resolve(
        &args.path,
        args.ext.as_deref(),
        args.destination_dir.as_deref(),
    )?;
    check_destination(fs, paths.output_dir())?;

    if args.dry_run {
        let plan = plan_rotation(fs, &algorithm, &paths, clock)?;
        return Ok(RotateResult::Planned(plan));
    }

    let outcome = rotate(fs, clock, logger, &algorithm, &paths)?;
    Ok(RotateResult::Rotated(outcome))
}

fn log_algorithm<L: Logger>(algorithm: &Algorithm, logger: &L) {
    logger.verbose(match algorithm {
        Algorithm::Simple(_) => "Using Simple (FIFO) Rotator",
        Algorithm::Hanoi(_) => "Using Hanoi Rotator",
        Algorithm::Tiered(_) => "Using Tiered Rotator",
    });

    if algorithm.slot_count() > MAX_LISTED_SLOTS {
        logger.verbose(&format!("Rotation slots are: {} slots", algorithm.slot_count()));
    } else if let Algorithm::Tiered(tiered) = algorithm {
        let tiers: Vec<Vec<Slot>> = tiered.tiers().iter().map(|t| t.slots().collect()).collect();
        logger.verbose(&format!("Rotation slots are: {:?}", tiers));
    } else {
        logger.verbose(&format!("Rotation slots are: {:?}", algorithm.slots()));
    }

    if let Algorithm::Tiered(tiered) = algorithm {
        let multipliers: Vec<u64> = tiered.tiers().iter().map(|t| t.multiplier()).collect();
        logger.verbose(&format!("Multipliers are: {:?}", multipliers));
    }
}

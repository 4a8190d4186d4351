//! Exit codes for the archive-rotator CLI.
//!
//! Following Unix conventions for exit codes. Usage errors caught by the
//! argument parser itself exit with clap's own code 2.

use rotator_fs::RotationError;

use crate::commands::CommandError;

/// Exit code constants.
pub mod codes {
    /// Successful execution, including a skipped missing input.
    pub const SUCCESS: i32 = 0;
    /// Invalid arguments, slot counts, path or extension.
    pub const INVALID_ARGS: i32 = 1;
    /// IO error while scanning, moving, or printing.
    pub const IO_ERROR: i32 = 3;
    /// Input file not found.
    pub const INPUT_NOT_FOUND: i32 = 4;
    /// Destination directory missing.
    pub const DESTINATION_NOT_FOUND: i32 = 5;
    /// Rotation ids exhausted.
    pub const IDS_EXHAUSTED: i32 = 6;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::InvalidArgument(_) => codes::INVALID_ARGS,
        CommandError::Rotation(e) => rotation_exit_code(e),
        CommandError::Output(_) => codes::IO_ERROR,
    }
}

fn rotation_exit_code(error: &RotationError) -> i32 {
    match error {
        RotationError::InvalidPath { .. }
        | RotationError::InvalidExtension(_)
        | RotationError::ExtensionMismatch { .. } => codes::INVALID_ARGS,
        RotationError::InputNotFound(_) => codes::INPUT_NOT_FOUND,
        RotationError::DestinationNotFound(_) => codes::DESTINATION_NOT_FOUND,
        RotationError::IdsExhausted(_) => codes::IDS_EXHAUSTED,
        RotationError::Scan { .. } | RotationError::Move { .. } => codes::IO_ERROR,
    }
}

//! Command orchestration for the CLI.

pub mod rotate;

pub use rotate::{execute_rotate, RotateResult};

use rotator_fs::RotationError;
use thiserror::Error;

use crate::cli::CliError;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("{0}")]
    Rotation(#[from] RotationError),

    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;

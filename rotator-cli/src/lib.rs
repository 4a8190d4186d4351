//! archive-rotator CLI.
//!
//! Argument parsing, validation, the rotate command, exit codes, and the
//! stdout summary for the `archive-rotator` binary.

pub mod cli;
pub mod commands;
pub mod exit;
pub mod output;

pub use cli::{parse_from, Cli, CliError, OutputFormat};
pub use commands::{execute_rotate, CommandError, CommandResult, RotateResult};
pub use output::RotationSummary;

//! archive-rotator binary.
//!
//! Entry point for the `archive-rotator` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use rotator_cli::exit::{codes, exit_code};
use rotator_cli::{execute_rotate, Cli, CommandError, RotationSummary};
use rotator_clock::SystemClock;
use rotator_fs::RealFilesystem;
use rotator_log::{StderrLogger, Verbosity};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::from(codes::SUCCESS as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), CommandError> {
    let logger = StderrLogger::new(Verbosity::from_count(cli.verbose));
    let result = execute_rotate(cli, &RealFilesystem, &SystemClock, &logger)?;

    if let Some(summary) = RotationSummary::from(&result).render(cli.output)? {
        println!("{}", summary);
    }

    Ok(())
}

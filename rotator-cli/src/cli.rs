//! CLI argument parsing for archive-rotator.
//!
//! Example:
//!
//! ```text
//! archive-rotator -v -n 5 /path/to/foo/mydump.tgz
//! archive-rotator --tiered -n 6 -n 3 -n 12 --ext .tar.gz /backups/db.tar.gz
//! ```

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use rotator_slots::{AlgorithmConfig, AlgorithmKind, ConfigError};
use thiserror::Error;

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error(transparent)]
    Algorithm(#[from] ConfigError),
}

/// How the rotation summary is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable; silent for a completed rotation.
    #[default]
    Text,
    /// A JSON document, always printed.
    Json,
}

/// Move a file into a rotation of backup archives.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "archive-rotator")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("algorithm").args(["simple", "hanoi", "tiered"])))]
pub struct Cli {
    /// Path of input file to rotate.
    pub path: PathBuf,

    /// Number of rotation slots. Repeat once per tier with --tiered.
    #[arg(short = 'n', long = "num", action = ArgAction::Append)]
    pub num: Vec<u32>,

    /// Use the first-in-first-out rotation pattern (default).
    #[arg(long)]
    pub simple: bool,

    /// Use the Tower of Hanoi rotation pattern.
    #[arg(long)]
    pub hanoi: bool,

    /// Use the tiered rotation pattern.
    #[arg(long)]
    pub tiered: bool,

    /// Look for and preserve the named file extension.
    #[arg(long)]
    pub ext: Option<String>,

    /// Put the rotated archive in this directory instead of next to the input.
    #[arg(long)]
    pub destination_dir: Option<PathBuf>,

    /// If the input file is missing, log and exit normally.
    #[arg(long)]
    pub ignore_missing: bool,

    /// Print progress to stderr (-vv for per-file details).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Show what would be moved and removed without touching any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Summary format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Cli {
    /// Algorithm selected by the flags; simple when none is given.
    pub fn algorithm_kind(&self) -> AlgorithmKind {
        if self.hanoi {
            AlgorithmKind::Hanoi
        } else if self.tiered {
            AlgorithmKind::Tiered
        } else {
            AlgorithmKind::Simple
        }
    }

    pub fn algorithm_config(&self) -> AlgorithmConfig {
        AlgorithmConfig::new(self.algorithm_kind(), self.num.clone())
    }

    /// Validate the slot configuration.
    ///
    /// `--ext` is checked later, when the path is resolved, so that a missing
    /// input with `--ignore-missing` stays a no-op whatever the extension.
    pub fn validate(&self) -> Result<(), CliError> {
        self.algorithm_config().validate()?;
        Ok(())
    }
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Parsing
    // ===========================================

    #[test]
    fn test_requires_path() {
        let err = parse_from(["archive-rotator", "-n", "3"]).unwrap_err();
        assert!(err.to_string().contains("<PATH>"));
    }

    #[test]
    fn test_minimal_invocation() {
        let cli = parse_from(["archive-rotator", "-n", "5", "/b/mydump.tgz"]).expect("parse");

        assert_eq!(cli.path, PathBuf::from("/b/mydump.tgz"));
        assert_eq!(cli.num, vec![5]);
        assert_eq!(cli.algorithm_kind(), AlgorithmKind::Simple);
        assert_eq!(cli.ext, None);
        assert_eq!(cli.destination_dir, None);
        assert!(!cli.ignore_missing);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_repeated_num_for_tiers() {
        let cli = parse_from([
            "archive-rotator", "--tiered", "-n", "6", "--num", "3", "-n", "12", "/b/db.tgz",
        ])
        .expect("parse");

        assert_eq!(cli.num, vec![6, 3, 12]);
        assert_eq!(
            cli.algorithm_config(),
            AlgorithmConfig::new(AlgorithmKind::Tiered, vec![6, 3, 12])
        );
    }

    #[test]
    fn test_algorithm_flags() {
        let hanoi = parse_from(["archive-rotator", "--hanoi", "-n", "4", "x"]).unwrap();
        assert_eq!(hanoi.algorithm_kind(), AlgorithmKind::Hanoi);

        let simple = parse_from(["archive-rotator", "--simple", "-n", "4", "x"]).unwrap();
        assert_eq!(simple.algorithm_kind(), AlgorithmKind::Simple);
    }

    #[test]
    fn test_algorithm_flags_are_exclusive() {
        let result = parse_from(["archive-rotator", "--hanoi", "--tiered", "-n", "4", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_num_is_rejected_by_parser() {
        assert!(parse_from(["archive-rotator", "-n", "-1", "x"]).is_err());
    }

    #[test]
    fn test_all_options() {
        let cli = parse_from([
            "archive-rotator",
            "-vv",
            "--ext",
            ".tar.gz",
            "--destination-dir",
            "/srv/archive",
            "--ignore-missing",
            "--dry-run",
            "--output",
            "json",
            "-n",
            "7",
            "/tmp/in/dump.tar.gz",
        ])
        .expect("parse");

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.ext.as_deref(), Some(".tar.gz"));
        assert_eq!(cli.destination_dir, Some(PathBuf::from("/srv/archive")));
        assert!(cli.ignore_missing);
        assert!(cli.dry_run);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    // ===========================================
    // Validation
    // ===========================================

    #[test]
    fn test_validate_ok() {
        let cli = parse_from(["archive-rotator", "-n", "5", "--ext", ".tgz", "x.tgz"]).unwrap();
        assert_eq!(cli.validate(), Ok(()));
    }

    #[test]
    fn test_validate_requires_num() {
        let cli = parse_from(["archive-rotator", "x"]).unwrap();
        assert_eq!(cli.validate(), Err(CliError::Algorithm(ConfigError::NoSlots)));
    }

    #[test]
    fn test_validate_rejects_zero() {
        let cli = parse_from(["archive-rotator", "-n", "0", "x"]).unwrap();
        assert_eq!(
            cli.validate(),
            Err(CliError::Algorithm(ConfigError::InvalidSlotCount(0)))
        );
    }

    #[test]
    fn test_validate_multiple_nums_need_tiered() {
        let cli = parse_from(["archive-rotator", "--hanoi", "-n", "3", "-n", "4", "x"]).unwrap();
        assert_eq!(
            cli.validate(),
            Err(CliError::Algorithm(ConfigError::MultipleSlotCounts {
                algorithm: AlgorithmKind::Hanoi,
                count: 2,
            }))
        );
    }

    #[test]
    fn test_validate_ignores_extension() {
        let cli = parse_from(["archive-rotator", "-n", "3", "--ignore-missing", "--ext", "tgz", "/nope/x.tgz"])
            .unwrap();
        assert_eq!(cli.validate(), Ok(()));
    }
}

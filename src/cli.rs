use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};

use crate::config::{DEFAULT_BASE_DIR, DEFAULT_SCHEMA_PREFIX};

mod run_impl;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "schemawalk",
    version,
    about = "Report the schema files included by Liquibase changelog trees",
    long_about = None
)]
pub struct Args {
    /// Directory searched for master.yaml files
    #[arg(value_name = "BASE", default_value = DEFAULT_BASE_DIR, value_hint = ValueHint::DirPath)]
    pub base: PathBuf,

    /// Include targets starting with this prefix count as schema files
    #[arg(long = "schema-prefix", value_name = "PREFIX", default_value = DEFAULT_SCHEMA_PREFIX)]
    pub schema_prefix: String,

    /// Directory the report files are written to
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".", value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    /// Print the report as JSON instead of the text transcript
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Follow symlinks
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    pub follow_symlinks: bool,

    /// Skip files excluded by .gitignore/.ignore
    #[arg(long = "respect-gitignore", action = ArgAction::SetTrue)]
    pub respect_gitignore: bool,

    /// Show a progress bar over master files
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Verbose logging (-v: recursion steps, -vv: skipped entries)
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Runs the CLI application.
///
/// # Errors
/// Returns an error if the base directory is missing or reports cannot be written.
pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::logging::init(args.verbose);
    run_impl::run_with_args(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_project_layout() {
        let args = Args::try_parse_from(["schemawalk"]).unwrap();
        assert_eq!(args.base, PathBuf::from(DEFAULT_BASE_DIR));
        assert_eq!(args.schema_prefix, DEFAULT_SCHEMA_PREFIX);
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(!args.json);
    }

    #[test]
    fn verbose_counts() {
        let args = Args::try_parse_from(["schemawalk", "-vv", "cl"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.base, PathBuf::from("cl"));
    }
}

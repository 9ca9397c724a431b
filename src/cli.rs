use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};

use crate::formatters::text::DEFAULT_IDENTICAL_LIMIT;
use crate::logging;

mod run_impl;

pub use run_impl::run_with_args;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug, Clone)]
#[command(
    name = "compare",
    version,
    about = "Compare two directory trees, ignoring line-ending differences",
    long_about = None
)]
pub struct Args {
    /// First directory (e.g. a checkout of one branch)
    #[arg(value_name = "BRANCH1_DIR", value_hint = ValueHint::DirPath)]
    pub branch1: PathBuf,

    /// Second directory
    #[arg(value_name = "BRANCH2_DIR", value_hint = ValueHint::DirPath)]
    pub branch2: PathBuf,

    /// Display name for the first directory
    #[arg(long = "name1", value_name = "NAME", default_value = "Branch 1")]
    pub name1: String,

    /// Display name for the second directory
    #[arg(long = "name2", value_name = "NAME", default_value = "Branch 2")]
    pub name2: String,

    /// Output JSON instead of the text report
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Follow symlinked directories while walking
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    pub follow_symlinks: bool,

    /// Skip files matched by .gitignore/.ignore rules
    #[arg(long = "respect-gitignore", action = ArgAction::SetTrue)]
    pub respect_gitignore: bool,

    /// How many identical files to list before summarizing the rest
    #[arg(long = "identical-limit", value_name = "N", default_value_t = DEFAULT_IDENTICAL_LIMIT)]
    pub identical_limit: usize,

    /// Re-read files with matching hashes and compare their normalized bytes
    #[arg(long = "verify", action = ArgAction::SetTrue)]
    pub verify: bool,

    /// Show a spinner while hashing
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Verbose logging (repeat for more)
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Runs the CLI application.
///
/// # Errors
/// Returns an error if either root is invalid or the report cannot be produced.
pub fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    run_with_args(&args)
}

//! Command-line argument definitions.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the system preferences engine.
#[derive(Parser, Debug)]
#[command(
    name = "sysprefs",
    about = "Cross-platform system preferences management engine",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override configuration root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Converge system preferences toward the configured state
    Apply(ApplyOpts),
    /// Remove configured preferences, undoing a previous apply
    Remove(RemoveOpts),
    /// Report the current state of every configured resource
    Check(CheckOpts),
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CheckOpts {}

use anyhow::Result;
use clap::Parser;

use sysprefs_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new(args.verbose);

    match args.command {
        cli::Command::Apply(opts) => commands::apply::run(&args.global, &opts, &log),
        cli::Command::Remove(opts) => commands::remove::run(&args.global, &opts, &log),
        cli::Command::Check(opts) => commands::check::run(&args.global, &opts, &log),
        cli::Command::Version => {
            commands::print_version();
            Ok(())
        }
    }
}

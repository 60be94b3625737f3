use toolbelt_core::logging::{self, LogLevel};

mod cli;

use crate::cli::Cli;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // -v / -q log to stderr at the requested level; otherwise log to the state file.
    if cli.verbose || cli.quiet {
        logging::init_logging_stderr(LogLevel::from_flags(cli.verbose, cli.quiet));
    } else if logging::init_logging().is_err() {
        logging::init_logging_stderr(LogLevel::from_flags(false, false));
    }

    if let Err(err) = cli.run() {
        eprintln!("toolbelt error: {:#}", err);
        std::process::exit(1);
    }
}

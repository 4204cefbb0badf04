//! DupeClean - Interactive Duplicate File Finder and Cleaner
//!
//! Entry point for the DupeClean CLI application.

use clap::Parser;
use dupeclean::{cli::Cli, duplicates::FinderError, error::ExitCode};

fn main() {
    let cli = Cli::parse();
    dupeclean::logging::init_logging(cli.verbose, cli.quiet);

    match dupeclean::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = if err
                .downcast_ref::<FinderError>()
                .is_some_and(|e| matches!(e, FinderError::Interrupted))
            {
                ExitCode::Interrupted
            } else {
                ExitCode::GeneralError
            };

            eprintln!("Error: {:#}", err);
            std::process::exit(exit_code.as_i32());
        }
    }
}

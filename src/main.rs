//! dupsweep - Guarded duplicate file sweeper
//!
//! Entry point for the dupsweep CLI.

use clap::Parser;
use dupsweep::cli::Cli;
use dupsweep::error::{ConfigError, ExitCode};

fn main() {
    let cli = Cli::parse();

    match dupsweep::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = if err.downcast_ref::<ConfigError>().is_some() {
                ExitCode::ConfigError
            } else {
                ExitCode::GeneralError
            };
            eprintln!("Error: {err}");
            std::process::exit(exit_code.as_i32());
        }
    }
}

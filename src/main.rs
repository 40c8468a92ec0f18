//! timelapser CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! directory-to-video flow, and exit with appropriate status.
//! For programmatic use, prefer the library API (`timelapser::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! subloc CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, run the launcher, and map
//! failures to an exit status. Usage problems print guidance and the usage
//! line and exit with 2; I/O failures exit with 1.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let usage = cli::CliArgs::command().render_usage().to_string();
            let _ = e.report(&usage, &mut std::io::stderr());
            ExitCode::from(e.exit_code())
        }
    }
}

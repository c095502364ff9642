//! Binary entrypoint for the `jarvis` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match jarvis::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

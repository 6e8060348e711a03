//! Binary entrypoint for the `hdlgen` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match hdlgen::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Core library entry for the `hdlgen` CLI.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod frontier;
pub mod generate;
pub mod ports;
pub mod store;
pub mod tree;
pub mod validate;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    dotenvy::dotenv().ok();
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["hdlgen", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_without_subcommand() {
        let result = run(["hdlgen"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_requires_endpoint_for_live_runs() {
        let result = run(["hdlgen", "run", "cpu.txt"]);
        assert!(result.unwrap_err().contains("--endpoint"));
    }
}

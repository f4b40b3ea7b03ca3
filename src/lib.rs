//! Core library entry for the `taxocheck` CLI.
//!
//! Scans the plugin, content and playbook repositories into taxonomy maps
//! and reports every structural divergence between them.

pub mod adapters;
pub mod audit;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod report;
pub mod scan;
pub mod taxonomy;
pub mod telemetry;

use clap::Parser;

pub use commands::Outcome;

/// Run the CLI with the provided arguments.
///
/// Help and version requests are printed and count as a clean run.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<Outcome, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(Outcome::Clean);
        }
        Err(err) => return Err(err.to_string()),
    };
    telemetry::init_tracing(cli.log_json, telemetry::level_for(cli.verbose));
    commands::dispatch(&cli.command)
}

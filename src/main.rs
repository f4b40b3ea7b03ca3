//! Binary entrypoint for the `taxocheck` CLI.

use std::process::ExitCode;

use taxocheck::Outcome;

fn main() -> ExitCode {
    // Optional .env with TAXOCHECK_* roots.
    dotenvy::dotenv().ok();

    match taxocheck::run(std::env::args()) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Drifted) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

//! Command dispatch and handlers.

pub mod check;
pub mod domain;
pub mod show;

use crate::cli::Command;
use crate::context::ServiceContext;

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// The repositories have drifted apart.
    Drifted,
}

/// Dispatch a parsed command to its handler against the real disk.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<Outcome, String> {
    dispatch_with_context(command, &ServiceContext::live())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<Outcome, String> {
    match command {
        Command::Check(args) => check::run(ctx, args),
        Command::Show(args) => show::run(ctx, args),
        Command::Domain(args) => domain::run(ctx, args),
    }
}

//! `taxocheck check` command.

use crate::audit;
use crate::cli::{CheckArgs, OutputFormat};
use crate::commands::Outcome;
use crate::config::CheckConfig;
use crate::context::ServiceContext;
use crate::report;

/// Execute the `check` command.
///
/// Prints the report to stdout and returns [`Outcome::Drifted`] when any
/// diagnostic survived the filters.
///
/// # Errors
///
/// Returns an error string if a repository cannot be scanned or the
/// configuration is rejected.
pub fn run(ctx: &ServiceContext, args: &CheckArgs) -> Result<Outcome, String> {
    let (output, outcome) = render(ctx, args)?;
    println!("{output}");
    Ok(outcome)
}

/// Builds the configuration from CLI arguments.
///
/// # Errors
///
/// Returns an error string if the repository roots cannot be resolved.
pub fn config_from_args(args: &CheckArgs) -> Result<CheckConfig, String> {
    let mut config = CheckConfig::new(args.repos.resolve()?);
    config.content_domains.clone_from(&args.domains);
    config.playbook_domains = if args.playbook_domains.is_empty() {
        args.domains.clone()
    } else {
        args.playbook_domains.clone()
    };
    config.include_security = args.include_security;
    config.strict_domains = args.strict_domains;
    Ok(config)
}

fn render(ctx: &ServiceContext, args: &CheckArgs) -> Result<(String, Outcome), String> {
    let config = config_from_args(args)?;
    let mut report = audit::run(ctx, &config).map_err(|e| e.to_string())?;
    if let Some(prefix) = &args.code_prefix {
        report = report.with_code_prefix(prefix);
    }

    let output = match args.format {
        OutputFormat::Text => report::format_report(&report),
        OutputFormat::Json => report::format_json(&report)?,
    };
    let outcome = if report.is_clean() { Outcome::Clean } else { Outcome::Drifted };
    Ok((output, outcome))
}

//! `taxocheck domain` command.

use crate::audit::Taxonomies;
use crate::cli::{DomainArgs, Repo};
use crate::commands::Outcome;
use crate::context::ServiceContext;
use crate::taxonomy::{TaxonomyMap, TaxonomyRecord};

/// Execute the `domain` command.
///
/// # Errors
///
/// Returns an error string if the roots cannot be resolved or scanned.
pub fn run(ctx: &ServiceContext, args: &DomainArgs) -> Result<Outcome, String> {
    let taxonomies = Taxonomies::scan(ctx, &args.repos.resolve()?).map_err(|e| e.to_string())?;
    println!("{}", format_domain(&taxonomies, args.repo, &args.domain));
    Ok(Outcome::Clean)
}

/// Lists the plugins of one repository filed exactly under `domain`.
#[must_use]
pub fn format_domain(taxonomies: &Taxonomies, repo: Repo, domain: &str) -> String {
    let names = match repo {
        Repo::Plugins => names_in(&taxonomies.plugins.map, domain),
        Repo::Content => names_in(&taxonomies.content.map, domain),
        Repo::Playbooks => names_in(&taxonomies.playbooks.map, domain),
    };
    if names.is_empty() {
        return format!("No plugins under {domain}.");
    }
    let mut lines = vec![format!("Plugins under {domain} ({}):", names.len())];
    lines.extend(names.into_iter().map(|n| format!("  {n}")));
    lines.join("\n")
}

fn names_in<R: TaxonomyRecord>(map: &TaxonomyMap<R>, domain: &str) -> Vec<String> {
    map.in_domain(domain).map(|(name, _)| name.to_string()).collect()
}

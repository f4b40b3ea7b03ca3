//! `taxocheck show` command.

use crate::audit::Taxonomies;
use crate::cli::ShowArgs;
use crate::commands::Outcome;
use crate::compare::diagnostic::format_set;
use crate::context::ServiceContext;
use crate::taxonomy::RoleRecord;

/// Execute the `show` command.
///
/// Prints the record each repository holds for the plugin.
///
/// # Errors
///
/// Returns an error string if the roots cannot be resolved or scanned.
pub fn run(ctx: &ServiceContext, args: &ShowArgs) -> Result<Outcome, String> {
    if args.plugin.is_empty() {
        return Err("plugin name must not be empty".to_string());
    }
    let taxonomies = Taxonomies::scan(ctx, &args.repos.resolve()?).map_err(|e| e.to_string())?;
    println!("{}", format_plugin(&taxonomies, &args.plugin));
    Ok(Outcome::Clean)
}

/// Formats everything the three repositories know about `plugin`.
#[must_use]
pub fn format_plugin(taxonomies: &Taxonomies, plugin: &str) -> String {
    let mut lines = vec![format!("Plugin {plugin}:")];

    match taxonomies.plugins.map.get(plugin) {
        Some(record) => {
            lines.push("Repo PLUGIN:".to_string());
            lines.push(format!("  domain: {}", record.domain_path));
            lines.push(format!("  error keys: {}", format_set(&record.error_keys)));
        }
        None => lines.push("Repo PLUGIN has no such plugin.".to_string()),
    }
    push_role_record(&mut lines, "CONTENT", taxonomies.content.map.get(plugin));
    push_role_record(&mut lines, "PLAYBOOK", taxonomies.playbooks.map.get(plugin));

    lines.join("\n")
}

fn push_role_record(lines: &mut Vec<String>, repo: &str, record: Option<&RoleRecord>) {
    let Some(record) = record else {
        lines.push(format!("Repo {repo} has no such plugin."));
        return;
    };
    lines.push(format!("Repo {repo}:"));
    lines.push(format!("  domain: {}", record.domain_path));
    for (key, roles) in &record.error_key_roles {
        lines.push(format!("  {key}: {}", format_set(roles)));
    }
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::RepoPaths;

/// Top-level CLI parser for `taxocheck`.
#[derive(Debug, Parser)]
#[command(
    name = "taxocheck",
    version,
    about = "Check plugin, content and playbook repositories for drift"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Repository root options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Directory holding insights-plugins, insights-content and insights-playbooks.
    #[arg(long, env = "TAXOCHECK_WORKING_PATH")]
    pub working_path: Option<PathBuf>,

    /// Plugin source root (overrides the working path layout).
    #[arg(long, env = "TAXOCHECK_PLUGINS")]
    pub plugins: Option<PathBuf>,

    /// Content root (overrides the working path layout).
    #[arg(long, env = "TAXOCHECK_CONTENT")]
    pub content: Option<PathBuf>,

    /// Playbook root (overrides the working path layout).
    #[arg(long, env = "TAXOCHECK_PLAYBOOKS")]
    pub playbooks: Option<PathBuf>,
}

impl RepoArgs {
    /// Resolves the three repository roots.
    ///
    /// # Errors
    ///
    /// Returns an error if a root is neither given nor derivable from the
    /// working path.
    pub fn resolve(&self) -> Result<RepoPaths, String> {
        RepoPaths::resolve(
            self.working_path.as_deref(),
            self.plugins.clone(),
            self.content.clone(),
            self.playbooks.clone(),
        )
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Repository selector for `domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Repo {
    /// Plugin sources.
    #[default]
    Plugins,
    /// Content.
    Content,
    /// Playbooks.
    Playbooks,
}

/// Options of the `check` subcommand.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Repository roots.
    #[command(flatten)]
    pub repos: RepoArgs,
    /// Only check plugins whose domain path contains this term (repeatable).
    #[arg(long = "domain", value_name = "DOMAIN")]
    pub domains: Vec<String>,
    /// Domain filter for the playbook comparison (defaults to --domain).
    #[arg(long = "playbook-domain", value_name = "DOMAIN")]
    pub playbook_domains: Vec<String>,
    /// Report security plugins in the playbook comparison.
    #[arg(long)]
    pub include_security: bool,
    /// Fail when a domain filter is not a known domain.
    #[arg(long)]
    pub strict_domains: bool,
    /// Only print diagnostics whose code starts with this prefix, e.g. ERR2.
    #[arg(long, value_name = "PREFIX")]
    pub code_prefix: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Options of the `show` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Repository roots.
    #[command(flatten)]
    pub repos: RepoArgs,
    /// Plugin name.
    pub plugin: String,
}

/// Options of the `domain` subcommand.
#[derive(Debug, Clone, Args)]
pub struct DomainArgs {
    /// Repository roots.
    #[command(flatten)]
    pub repos: RepoArgs,
    /// Domain path, e.g. `satellite` or `osp/nova`.
    pub domain: String,
    /// Repository to list.
    #[arg(long, value_enum, default_value_t)]
    pub repo: Repo,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare plugins with content and content with playbooks.
    Check(CheckArgs),
    /// Show what each repository knows about one plugin.
    Show(ShowArgs),
    /// List the plugins filed under one domain path.
    Domain(DomainArgs),
}

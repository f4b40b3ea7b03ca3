//! Run configuration: repository roots, domain filters and policies.

use std::path::{Path, PathBuf};

/// Valid first-level domain names of the plugin repository.
pub const DOMAIN_LIST: [&str; 23] = [
    "aws",
    "bonding",
    "ceph",
    "container",
    "database",
    "idm",
    "java",
    "kdump",
    "kernel",
    "networking",
    "non_kernel",
    "oracle",
    "osp",
    "registration",
    "rhev",
    "sap",
    "satellite",
    "security",
    "service",
    "shift",
    "storage",
    "util",
    "webservers",
];

/// Default plugin root below a working path.
pub const DEFAULT_PLUGINS_DIR: &str = "insights-plugins/telemetry/rules/plugins";
/// Default content root below a working path.
pub const DEFAULT_CONTENT_DIR: &str = "insights-content/content";
/// Default playbook root below a working path.
pub const DEFAULT_PLAYBOOKS_DIR: &str = "insights-playbooks/playbooks";

/// Roots of the three repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// Plugin source tree.
    pub plugins: PathBuf,
    /// Content tree.
    pub content: PathBuf,
    /// Playbook tree.
    pub playbooks: PathBuf,
}

impl RepoPaths {
    /// Roots for three repositories checked out side by side under `working_path`.
    #[must_use]
    pub fn under(working_path: &Path) -> Self {
        Self {
            plugins: working_path.join(DEFAULT_PLUGINS_DIR),
            content: working_path.join(DEFAULT_CONTENT_DIR),
            playbooks: working_path.join(DEFAULT_PLAYBOOKS_DIR),
        }
    }

    /// Builds roots from explicit overrides, falling back to `working_path`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first root that is neither given nor
    /// derivable from a working path.
    pub fn resolve(
        working_path: Option<&Path>,
        plugins: Option<PathBuf>,
        content: Option<PathBuf>,
        playbooks: Option<PathBuf>,
    ) -> Result<Self, String> {
        let defaults = working_path.map(Self::under);
        let pick = |explicit: Option<PathBuf>, fallback: Option<&PathBuf>, flag: &str| {
            explicit.or_else(|| fallback.cloned()).ok_or_else(|| {
                format!("no {flag} root given; pass --{flag} or --working-path")
            })
        };
        Ok(Self {
            plugins: pick(plugins, defaults.as_ref().map(|d| &d.plugins), "plugins")?,
            content: pick(content, defaults.as_ref().map(|d| &d.content), "content")?,
            playbooks: pick(playbooks, defaults.as_ref().map(|d| &d.playbooks), "playbooks")?,
        })
    }
}

/// Immutable settings for one consistency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Repository roots.
    pub paths: RepoPaths,
    /// Domain filter for the plugin-vs-content comparison.
    pub content_domains: Vec<String>,
    /// Domain filter for the content-vs-playbook comparison.
    pub playbook_domains: Vec<String>,
    /// Report security plugins in the content-vs-playbook comparison.
    pub include_security: bool,
    /// Fail instead of warning when a domain filter is not in [`DOMAIN_LIST`].
    pub strict_domains: bool,
}

impl CheckConfig {
    /// Config with no domain filters and security excluded.
    #[must_use]
    pub fn new(paths: RepoPaths) -> Self {
        Self {
            paths,
            content_domains: Vec::new(),
            playbook_domains: Vec::new(),
            include_security: false,
            strict_domains: false,
        }
    }

    /// Filter entries of both phases that are not in [`DOMAIN_LIST`], deduplicated.
    #[must_use]
    pub fn invalid_domains(&self) -> Vec<String> {
        let mut invalid = invalid_domains(&self.content_domains);
        for domain in invalid_domains(&self.playbook_domains) {
            if !invalid.contains(&domain) {
                invalid.push(domain);
            }
        }
        invalid
    }
}

/// Returns the entries of `domains` that are not valid domain names.
#[must_use]
pub fn invalid_domains(domains: &[String]) -> Vec<String> {
    domains.iter().filter(|d| !DOMAIN_LIST.contains(&d.as_str())).cloned().collect()
}

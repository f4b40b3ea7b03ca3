//! Full consistency check: scan all three repositories, then compare
//! plugins with content and content with playbooks.

use serde::Serialize;
use tracing::{info, warn};

use crate::compare::{compare, CompareOptions, Diagnostic, Phase};
use crate::config::{CheckConfig, RepoPaths};
use crate::context::ServiceContext;
use crate::error::{AuditError, ScanError, ScanWarning};
use crate::scan::{content, playbooks, plugins, ScanOutcome};
use crate::taxonomy::{ContentRecord, PlaybookRecord, PluginRecord};

/// Scan results of all three repositories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomies {
    /// Plugin source scan.
    pub plugins: ScanOutcome<PluginRecord>,
    /// Content scan.
    pub content: ScanOutcome<ContentRecord>,
    /// Playbook scan.
    pub playbooks: ScanOutcome<PlaybookRecord>,
}

impl Taxonomies {
    /// Scans the three repository roots.
    ///
    /// # Errors
    ///
    /// Returns an error if any root cannot be walked.
    pub fn scan(ctx: &ServiceContext, paths: &RepoPaths) -> Result<Self, ScanError> {
        Ok(Self {
            plugins: plugins::scan(ctx, &paths.plugins)?,
            content: content::scan(ctx, &paths.content)?,
            playbooks: playbooks::scan(ctx, &paths.playbooks)?,
        })
    }

    /// Warnings of all three scans, in scan order.
    #[must_use]
    pub fn warnings(&self) -> Vec<ScanWarning> {
        self.plugins
            .warnings
            .iter()
            .chain(&self.content.warnings)
            .chain(&self.playbooks.warnings)
            .cloned()
            .collect()
    }
}

/// Diagnostics of one comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    /// Which comparison produced the diagnostics.
    pub phase: Phase,
    /// Diagnostics in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a full consistency check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    /// Invalid domain filter entries that were ignored by validation.
    pub invalid_domains: Vec<String>,
    /// Plugin-vs-content diagnostics.
    pub content: PhaseReport,
    /// Content-vs-playbook diagnostics.
    pub playbooks: PhaseReport,
    /// Artifacts skipped while scanning.
    pub warnings: Vec<ScanWarning>,
}

impl AuditReport {
    /// Both phase reports in print order.
    #[must_use]
    pub fn phases(&self) -> [&PhaseReport; 2] {
        [&self.content, &self.playbooks]
    }

    /// Total number of diagnostics.
    #[must_use]
    pub fn total(&self) -> usize {
        self.phases().iter().map(|p| p.diagnostics.len()).sum()
    }

    /// Returns `true` if no diagnostics were produced.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Copy of the report keeping only diagnostics whose code starts with `prefix`.
    #[must_use]
    pub fn with_code_prefix(&self, prefix: &str) -> Self {
        let keep = |phase: &PhaseReport| PhaseReport {
            phase: phase.phase,
            diagnostics: phase
                .diagnostics
                .iter()
                .filter(|d| d.code.as_str().starts_with(prefix))
                .cloned()
                .collect(),
        };
        Self {
            invalid_domains: self.invalid_domains.clone(),
            content: keep(&self.content),
            playbooks: keep(&self.playbooks),
            warnings: self.warnings.clone(),
        }
    }
}

/// Runs both comparisons over already scanned repositories.
#[must_use]
pub fn compare_all(taxonomies: &Taxonomies, config: &CheckConfig) -> AuditReport {
    let content = PhaseReport {
        phase: Phase::PluginContent,
        diagnostics: compare(
            Phase::PluginContent,
            &taxonomies.plugins.map,
            &taxonomies.content.map,
            CompareOptions { domains: &config.content_domains, include_security: false },
        ),
    };
    let playbooks = PhaseReport {
        phase: Phase::ContentPlaybook,
        diagnostics: compare(
            Phase::ContentPlaybook,
            &taxonomies.content.map,
            &taxonomies.playbooks.map,
            CompareOptions {
                domains: &config.playbook_domains,
                include_security: config.include_security,
            },
        ),
    };

    AuditReport {
        invalid_domains: config.invalid_domains(),
        content,
        playbooks,
        warnings: taxonomies.warnings(),
    }
}

/// Scans the repositories named in `config` and compares them.
///
/// # Errors
///
/// Returns an error if a repository root cannot be scanned, or if strict
/// domain checking is on and a domain filter is not a known domain.
pub fn run(ctx: &ServiceContext, config: &CheckConfig) -> Result<AuditReport, AuditError> {
    let invalid = config.invalid_domains();
    if !invalid.is_empty() {
        if config.strict_domains {
            return Err(AuditError::InvalidDomains(invalid));
        }
        warn!(domains = ?invalid, "Domain filter contains unknown domains");
    }

    let taxonomies = Taxonomies::scan(ctx, &config.paths)?;
    let report = compare_all(&taxonomies, config);
    info!(
        content = report.content.diagnostics.len(),
        playbooks = report.playbooks.diagnostics.len(),
        "Comparison complete"
    );
    Ok(report)
}

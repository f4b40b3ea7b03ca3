//! Comparison engine: structural diff of two taxonomy maps.

pub mod diagnostic;

use std::collections::BTreeSet;

pub use diagnostic::{Diagnostic, ErrorCode, Finding, Phase};

use crate::taxonomy::{TaxonomyMap, TaxonomyRecord};

/// Domain path prefix of security rules.
pub const SECURITY_DOMAIN: &str = "security";

/// Restrictions applied to one comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions<'a> {
    /// Domain filter terms; empty means no filter. A plugin passes when its
    /// domain path contains any term.
    pub domains: &'a [String],
    /// Whether plugins under `security` are reported.
    pub include_security: bool,
}

impl CompareOptions<'_> {
    fn passes_domain_filter(&self, domain_path: &str) -> bool {
        self.domains.is_empty() || self.domains.iter().any(|d| domain_path.contains(d.as_str()))
    }

    fn screens_security(&self, domain_path: &str) -> bool {
        !self.include_security && domain_path.starts_with(SECURITY_DOMAIN)
    }
}

/// Compares `left` against `right`, returning every divergence found.
///
/// Diagnostics for left plugins come first in left order, followed by
/// right-only plugins in right order. Role tags are compared only when both
/// record kinds carry them.
#[must_use]
pub fn compare<L, R>(
    phase: Phase,
    left: &TaxonomyMap<L>,
    right: &TaxonomyMap<R>,
    options: CompareOptions<'_>,
) -> Vec<Diagnostic>
where
    L: TaxonomyRecord,
    R: TaxonomyRecord,
{
    let mut diagnostics = Vec::new();
    let mut matched: BTreeSet<&str> = BTreeSet::new();

    for (name, left_record) in left.iter() {
        let left_path = left_record.domain_path();
        if phase.screens_left_security() && options.screens_security(left_path) {
            continue;
        }
        if !options.passes_domain_filter(left_path) {
            continue;
        }

        let Some(right_record) = right.get(name) else {
            diagnostics.push(Diagnostic::new(phase, name, left_path, Finding::MissingCounterpart));
            continue;
        };
        matched.insert(name);
        diagnostics.extend(compare_record(phase, name, left_record, right_record));
    }

    for (name, right_record) in right.iter().filter(|(name, _)| !matched.contains(name)) {
        let right_path = right_record.domain_path();
        if options.screens_security(right_path) || !options.passes_domain_filter(right_path) {
            continue;
        }
        diagnostics.push(Diagnostic::new(phase, name, right_path, Finding::UnexpectedCounterpart));
    }

    diagnostics
}

/// Diagnostics for one plugin present on both sides.
fn compare_record<L, R>(phase: Phase, name: &str, left: &L, right: &R) -> Vec<Diagnostic>
where
    L: TaxonomyRecord,
    R: TaxonomyRecord,
{
    let left_path = left.domain_path();
    let mut diagnostics = Vec::new();

    if left_path != right.domain_path() {
        diagnostics.push(Diagnostic::new(
            phase,
            name,
            left_path,
            Finding::WrongLocation {
                expected: left_path.to_string(),
                found: right.domain_path().to_string(),
            },
        ));
    }

    let left_keys = left.error_keys();
    let right_keys = right.error_keys();
    let compare_roles = L::CARRIES_ROLES && R::CARRIES_ROLES;

    for key in &left_keys {
        if !right_keys.contains(key) {
            diagnostics.push(Diagnostic::new(
                phase,
                name,
                left_path,
                Finding::MissingKey { key: (*key).to_string() },
            ));
            continue;
        }
        if !compare_roles {
            continue;
        }
        if let (Some(expected), Some(found)) = (left.roles(key), right.roles(key)) {
            if expected != found {
                diagnostics.push(Diagnostic::new(
                    phase,
                    name,
                    left_path,
                    Finding::RoleMismatch {
                        key: (*key).to_string(),
                        expected: expected.clone(),
                        found: found.clone(),
                    },
                ));
            }
        }
    }

    let extra: BTreeSet<String> =
        right_keys.difference(&left_keys).map(|k| (*k).to_string()).collect();
    if !extra.is_empty() {
        diagnostics.push(Diagnostic::new(phase, name, left_path, Finding::ExtraKeys { keys: extra }));
    }

    diagnostics
}

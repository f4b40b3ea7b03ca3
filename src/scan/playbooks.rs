//! Playbook repository scanner.
//!
//! Leaf directories follow `playbooks/<domain>/<plugin>/<error-key>/<role>/`.
//! The legacy layout `playbooks/<domain>/<plugin>/<error-key>/` has no role
//! directory and gets the default role tag.

use std::path::Path;

use tracing::{debug, info};

use crate::context::ServiceContext;
use crate::error::ScanError;
use crate::scan::{segments_after_marker, upsert_role_record, walk_root, ScanOutcome};
use crate::taxonomy::{PlaybookRecord, DEFAULT_PLAYBOOK_ROLE};

/// Marker segment preceding the domain path in the playbook repository.
pub const PLAYBOOKS_MARKER: &str = "playbooks";

/// A playbook leaf decoded from its path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookLeaf<'a> {
    /// Domain path.
    pub domain: String,
    /// Plugin name.
    pub plugin: &'a str,
    /// Error key.
    pub error_key: &'a str,
    /// Target role tag.
    pub role: &'a str,
}

/// Decodes the segments following the `playbooks` marker.
///
/// Returns `None` for any depth other than the role layout (4 segments) or
/// the legacy layout (3 segments).
#[must_use]
pub fn parse_leaf(segments: &[String]) -> Option<PlaybookLeaf<'_>> {
    match segments {
        [domain, plugin, error_key, role] => Some(PlaybookLeaf {
            domain: domain.clone(),
            plugin,
            error_key,
            role,
        }),
        [domain, plugin, error_key] => Some(PlaybookLeaf {
            domain: domain.clone(),
            plugin,
            error_key,
            role: DEFAULT_PLAYBOOK_ROLE,
        }),
        _ => None,
    }
}

/// Scans the playbook tree rooted at `root`.
///
/// # Errors
///
/// Returns an error if `root` cannot be walked.
pub fn scan(ctx: &ServiceContext, root: &Path) -> Result<ScanOutcome<PlaybookRecord>, ScanError> {
    let mut outcome = ScanOutcome::default();

    for listing in walk_root(ctx, PLAYBOOKS_MARKER, root)? {
        if !listing.is_leaf() {
            continue;
        }
        let Some(segments) = segments_after_marker(root, &listing.path, PLAYBOOKS_MARKER) else {
            continue;
        };
        let Some(leaf) = parse_leaf(&segments) else {
            continue;
        };
        debug!(plugin = leaf.plugin, error_key = leaf.error_key, role = leaf.role, "Found playbook");

        let record =
            upsert_role_record(&mut outcome.map, &mut outcome.warnings, leaf.plugin, &leaf.domain);
        record
            .error_key_roles
            .entry(leaf.error_key.to_string())
            .or_default()
            .insert(leaf.role.to_string());
    }

    info!(
        repo = PLAYBOOKS_MARKER,
        plugins = outcome.map.len(),
        warnings = outcome.warnings.len(),
        "Scan complete"
    );
    Ok(outcome)
}

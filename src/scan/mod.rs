//! Tree scanners: normalize each repository layout into a [`TaxonomyMap`].
//!
//! Every scanner locates its repository marker segment (`plugins`,
//! `content`, `playbooks`) and parses the path segments that follow it.
//! The marker is looked up in the scan root first; when the root sits above
//! the marker directory it is looked up below the root instead.

pub mod content;
pub mod metadata;
pub mod playbooks;
pub mod plugins;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Component, Path};

use serde::Serialize;
use tracing::warn;

use crate::context::ServiceContext;
use crate::error::{ScanError, ScanWarning};
use crate::ports::filesystem::DirListing;
use crate::taxonomy::{RoleRecord, TaxonomyMap};

/// Result of scanning one repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome<R> {
    /// Plugins discovered in the tree.
    pub map: TaxonomyMap<R>,
    /// Artifacts that were skipped or only partially read.
    pub warnings: Vec<ScanWarning>,
}

impl<R> Default for ScanOutcome<R> {
    fn default() -> Self {
        Self { map: TaxonomyMap::new(), warnings: Vec::new() }
    }
}

/// Walks `root`, turning a failure into a [`ScanError`].
pub(crate) fn walk_root(
    ctx: &ServiceContext,
    repo: &'static str,
    root: &Path,
) -> Result<Vec<DirListing>, ScanError> {
    ctx.fs.walk(root).map_err(|e| ScanError::RootUnreadable {
        repo,
        root: root.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Returns the path segments of `dir` that follow the `marker` segment.
///
/// Returns `None` when neither the root nor the path below it contains the
/// marker.
pub(crate) fn segments_after_marker(root: &Path, dir: &Path, marker: &str) -> Option<Vec<String>> {
    let root_parts = normal_components(root);
    let rel_parts = normal_components(dir.strip_prefix(root).ok()?);

    if let Some(pos) = root_parts.iter().rposition(|p| p == marker) {
        let mut segments = root_parts[pos + 1..].to_vec();
        segments.extend(rel_parts);
        return Some(segments);
    }

    let pos = rel_parts.iter().position(|p| p == marker)?;
    Some(rel_parts[pos + 1..].to_vec())
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Fetches the record for `name`, assigning `domain` to it.
///
/// Records a [`ScanWarning::DuplicatePlugin`] when the plugin was already
/// seen under a different domain.
pub(crate) fn upsert_role_record<'m>(
    map: &'m mut TaxonomyMap<RoleRecord>,
    warnings: &mut Vec<ScanWarning>,
    name: &str,
    domain: &str,
) -> &'m mut RoleRecord {
    let record = map.entry_or_default(name);
    if !record.domain_path.is_empty() && record.domain_path != domain {
        let warning = ScanWarning::DuplicatePlugin {
            name: name.to_string(),
            previous: record.domain_path.clone(),
            replacement: domain.to_string(),
        };
        warn!(%warning, "Plugin name collision");
        warnings.push(warning);
    }
    domain.clone_into(&mut record.domain_path);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn segments_follow_marker_in_root() {
        let root = PathBuf::from("/work/insights-content/content");
        let dir = root.join("networking/bond_mode/BOND_ERROR");
        assert_eq!(
            segments_after_marker(&root, &dir, "content").unwrap(),
            vec!["networking", "bond_mode", "BOND_ERROR"]
        );
    }

    #[test]
    fn segments_follow_marker_below_root() {
        let root = PathBuf::from("/work/insights-content");
        let dir = root.join("content/networking/bond_mode/BOND_ERROR");
        assert_eq!(
            segments_after_marker(&root, &dir, "content").unwrap(),
            vec!["networking", "bond_mode", "BOND_ERROR"]
        );
    }

    #[test]
    fn segments_use_innermost_root_marker() {
        let root = PathBuf::from("/content/repos/insights-content/content");
        let dir = root.join("osp/plug/KEY");
        assert_eq!(segments_after_marker(&root, &dir, "content").unwrap(), vec!["osp", "plug", "KEY"]);
    }

    #[test]
    fn segments_missing_marker_is_none() {
        let root = PathBuf::from("/work/elsewhere");
        assert!(segments_after_marker(&root, &root.join("a/b/c"), "content").is_none());
    }

    #[test]
    fn root_itself_has_no_segments() {
        let root = PathBuf::from("/work/playbooks");
        assert!(segments_after_marker(&root, &root, "playbooks").unwrap().is_empty());
    }

    #[test]
    fn upsert_warns_on_domain_collision() {
        let mut map = TaxonomyMap::new();
        let mut warnings = Vec::new();
        upsert_role_record(&mut map, &mut warnings, "dup", "kernel");
        upsert_role_record(&mut map, &mut warnings, "dup", "kernel");
        assert!(warnings.is_empty());

        upsert_role_record(&mut map, &mut warnings, "dup", "storage");
        assert_eq!(warnings.len(), 1);
        assert_eq!(map.get("dup").unwrap().domain_path, "storage");
    }
}

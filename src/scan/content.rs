//! Content repository scanner.
//!
//! A content leaf is a directory holding `metadata.yaml`, laid out as
//! `content/<domain...>/<plugin>/<error-key>/`. Its role tags are its
//! subdirectory names plus the `<product_code>_<role>` tag from metadata.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::error::ScanError;
use crate::scan::metadata::{load_leaf_metadata, METADATA_FILE};
use crate::scan::{segments_after_marker, upsert_role_record, walk_root, ScanOutcome};
use crate::taxonomy::ContentRecord;

/// Marker segment preceding the domain path in the content repository.
pub const CONTENT_MARKER: &str = "content";

/// Scans the content tree rooted at `root`.
///
/// Leaves whose metadata cannot be parsed are dropped and reported as
/// warnings.
///
/// # Errors
///
/// Returns an error if `root` cannot be walked.
pub fn scan(ctx: &ServiceContext, root: &Path) -> Result<ScanOutcome<ContentRecord>, ScanError> {
    let mut outcome = ScanOutcome::default();

    for listing in walk_root(ctx, CONTENT_MARKER, root)? {
        if !listing.has_file(METADATA_FILE) {
            continue;
        }
        let Some(segments) = segments_after_marker(root, &listing.path, CONTENT_MARKER) else {
            continue;
        };
        let [domain @ .., plugin, error_key] = segments.as_slice() else {
            continue;
        };
        if domain.is_empty() {
            continue;
        }

        let mut roles: BTreeSet<String> = listing.dirs.iter().cloned().collect();
        match load_leaf_metadata(ctx, &listing.path) {
            Ok(metadata) => roles.extend(metadata.role_tag()),
            Err(warning) => {
                warn!(%warning, "Skipping content leaf");
                outcome.warnings.push(warning);
                continue;
            }
        }

        let (plugin, error_key) = (plugin.trim(), error_key.trim());
        debug!(plugin, error_key, roles = roles.len(), "Found content leaf");

        let record =
            upsert_role_record(&mut outcome.map, &mut outcome.warnings, plugin, &domain.join("/"));
        record.error_key_roles.insert(error_key.to_string(), roles);
    }

    info!(
        repo = CONTENT_MARKER,
        plugins = outcome.map.len(),
        warnings = outcome.warnings.len(),
        "Scan complete"
    );
    Ok(outcome)
}

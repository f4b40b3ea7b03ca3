//! Error and warning types for tree scanning.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Operational failure that aborts a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root could not be walked at all.
    #[error("cannot scan {repo} tree at {}: {reason}", .root.display())]
    RootUnreadable {
        /// Which repository was being scanned.
        repo: &'static str,
        /// The root that failed.
        root: PathBuf,
        /// Underlying failure.
        reason: String,
    },
}

/// Failure of a whole consistency check.
#[derive(Error, Debug)]
pub enum AuditError {
    /// A repository could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Domain filters outside the allow-list while strict checking is on.
    #[error("invalid domain filter(s): {}", .0.join(", "))]
    InvalidDomains(Vec<String>),
}

/// Failure to load a YAML metadata document.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The document could not be read.
    #[error("failed to read: {0}")]
    Read(String),

    /// The document is not valid YAML.
    #[error("failed YAML parsing: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document parsed but its top level is not a mapping.
    #[error("top level is not a mapping")]
    NotMapping,
}

/// A per-artifact failure that was skipped without aborting the scan.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// A plugin source file could not be read; its keys may be incomplete.
    #[error("{}: unreadable plugin source ({reason})", .path.display())]
    UnreadableSource {
        /// The source file.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// An `ERROR_KEY` line had no assignment value.
    #[error("{}:{line}: malformed ERROR_KEY line", .path.display())]
    MalformedErrorKey {
        /// The source file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },

    /// An `ERROR_KEY` line was not valid UTF-8 and was ignored.
    #[error("{}:{line}: ERROR_KEY line is not valid UTF-8", .path.display())]
    UndecodableErrorKey {
        /// The source file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },

    /// A content leaf was dropped because a metadata document failed to load.
    #[error("{}: {reason}", .path.display())]
    BadMetadata {
        /// The metadata document.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },

    /// Two scanned artifacts claim the same plugin name in different domains.
    #[error("plugin {name} found in both {previous} and {replacement}; keeping {replacement}")]
    DuplicatePlugin {
        /// The colliding plugin name.
        name: String,
        /// Domain path of the record that was replaced.
        previous: String,
        /// Domain path of the record that was kept.
        replacement: String,
    },
}

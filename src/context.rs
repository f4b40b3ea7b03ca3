//! Service context bundling the port trait objects.

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::ports::filesystem::FileSystem;

/// Bundles the port trait objects the scanners read through.
pub struct ServiceContext {
    /// Filesystem for tree walks and file reads.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem) }
    }

    /// Creates a context around a custom filesystem, e.g. an in-memory tree.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

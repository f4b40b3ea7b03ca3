//! Filesystem port for tree walking and file reads.

use std::path::{Path, PathBuf};

/// One directory visited during a tree walk.
///
/// Mirrors a single step of a top-down walk: the directory itself plus the
/// names of its immediate subdirectories and files, each sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Full path of the directory.
    pub path: PathBuf,
    /// Names of the immediate subdirectories.
    pub dirs: Vec<String>,
    /// Names of the immediate non-directory entries.
    pub files: Vec<String>,
}

impl DirListing {
    /// Returns `true` if the directory has no subdirectories.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Returns `true` if the directory directly contains a file named `name`.
    #[must_use]
    pub fn has_file(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }
}

/// Provides filesystem access for the tree scanners.
///
/// Abstracting the filesystem lets the scanners run against an in-memory
/// tree in tests without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Reads the raw bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Walks the tree rooted at `root` top-down, returning one listing per
    /// directory (the root first), in sorted order.
    ///
    /// Unreadable subdirectories are skipped; only the root must be readable.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing, unreadable, or not a directory.
    fn walk(&self, root: &Path) -> Result<Vec<DirListing>, Box<dyn std::error::Error + Send + Sync>>;
}

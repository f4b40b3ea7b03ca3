//! In-memory filesystem for scanner tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::ports::filesystem::{DirListing, FileSystem};

/// Tree of directories and files held in memory.
///
/// A file stored with `None` contents fails to read.
#[derive(Default)]
pub(crate) struct MemFs {
    files: BTreeMap<PathBuf, Option<Vec<u8>>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemFs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn file(mut self, path: &str, contents: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_ancestors(&path);
        self.files.insert(path, Some(contents.as_bytes().to_vec()));
        self
    }

    pub(crate) fn bytes(mut self, path: &str, contents: &[u8]) -> Self {
        let path = PathBuf::from(path);
        self.add_ancestors(&path);
        self.files.insert(path, Some(contents.to_vec()));
        self
    }

    pub(crate) fn unreadable(mut self, path: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_ancestors(&path);
        self.files.insert(path, None);
        self
    }

    pub(crate) fn dir(mut self, path: &str) -> Self {
        let path = PathBuf::from(path);
        self.add_ancestors(&path);
        self.dirs.insert(path);
        self
    }

    pub(crate) fn into_context(self) -> ServiceContext {
        ServiceContext::with_fs(Box::new(self))
    }

    fn add_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn name_of(path: &Path) -> String {
        path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(String::from_utf8(self.read_bytes(path)?)?)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        match self.files.get(path) {
            Some(Some(contents)) => Ok(contents.clone()),
            Some(None) => Err("permission denied".into()),
            None => Err(format!("file not found: {}", path.display()).into()),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn walk(&self, root: &Path) -> Result<Vec<DirListing>, Box<dyn std::error::Error + Send + Sync>> {
        if !self.dirs.contains(root) {
            return Err(format!("no such directory: {}", root.display()).into());
        }
        let listings = self
            .dirs
            .iter()
            .filter(|d| d.starts_with(root))
            .map(|dir| DirListing {
                path: dir.clone(),
                dirs: self
                    .dirs
                    .iter()
                    .filter(|d| d.parent() == Some(dir.as_path()))
                    .map(|d| Self::name_of(d))
                    .collect(),
                files: self
                    .files
                    .keys()
                    .filter(|f| f.parent() == Some(dir.as_path()))
                    .map(|f| Self::name_of(f))
                    .collect(),
            })
            .collect();
        Ok(listings)
    }
}

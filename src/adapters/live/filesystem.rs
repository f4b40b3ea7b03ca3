//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::ports::filesystem::{DirListing, FileSystem};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk(&self, root: &Path) -> Result<Vec<DirListing>, Box<dyn std::error::Error + Send + Sync>> {
        let meta = std::fs::metadata(root)?;
        if !meta.is_dir() {
            return Err(format!("{} is not a directory", root.display()).into());
        }

        let mut listings: Vec<DirListing> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            let walked_into = entry.file_type().is_dir();
            // Symlinked directories are listed as directories but not descended.
            let is_dir = walked_into || (entry.path_is_symlink() && entry.path().is_dir());

            if entry.depth() > 0 {
                let slot = entry.path().parent().and_then(|parent| index.get(parent)).copied();
                if let Some(slot) = slot {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    if is_dir {
                        listings[slot].dirs.push(name);
                    } else {
                        listings[slot].files.push(name);
                    }
                }
            }

            if walked_into {
                index.insert(entry.path().to_path_buf(), listings.len());
                listings.push(DirListing {
                    path: entry.into_path(),
                    dirs: Vec::new(),
                    files: Vec::new(),
                });
            }
        }

        Ok(listings)
    }
}

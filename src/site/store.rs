// file: src/site/store.rs
// description: file store abstraction over the site tree
// reference: https://docs.rs/walkdir

use crate::error::{PressError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    /// Follows links: a symlink to a directory is a directory.
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Every pass reads and writes through this trait so it can run against
/// an in-memory tree in tests.
pub trait FileStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// All entries below `root`, excluding `root` itself. Order is whatever
    /// the backing store yields.
    fn walk(&self, root: &Path) -> Result<Vec<WalkEntry>>;

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| {
            PressError::file(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let bytes = self.read(from)?;
        self.write(to, &bytes)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for DiskStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|source| PressError::file(path, source))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).map_err(|source| PressError::file(path, source))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|source| PressError::file(path, source))
    }

    fn walk(&self, root: &Path) -> Result<Vec<WalkEntry>> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
            let entry = entry?;
            entries.push(WalkEntry {
                path: entry.path().to_path_buf(),
                is_dir: entry.path().is_dir(),
                is_symlink: entry.path_is_symlink(),
            });
        }

        Ok(entries)
    }

    // std::fs::copy keeps permission bits, which a read/write pair would drop
    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|source| PressError::file(to, source))
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeMap, BTreeSet};

    /// In-memory tree that counts writes.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
        dirs: RefCell<BTreeSet<PathBuf>>,
        writes: Cell<usize>,
    }

    impl MemoryStore {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Seeds a file (and its parent directories) without counting a write.
        pub(crate) fn insert(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                self.add_dirs(parent);
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.as_ref().to_vec());
        }

        pub(crate) fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files
                .borrow()
                .get(path.as_ref())
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        }

        pub(crate) fn has_dir(&self, path: impl AsRef<Path>) -> bool {
            self.dirs.borrow().contains(path.as_ref())
        }

        pub(crate) fn writes(&self) -> usize {
            self.writes.get()
        }

        fn add_dirs(&self, path: &Path) {
            let mut dirs = self.dirs.borrow_mut();
            for ancestor in path.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    impl FileStore for MemoryStore {
        fn read(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                PressError::file(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })
        }

        fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
            let parent_missing = path
                .parent()
                .is_some_and(|p| !p.as_os_str().is_empty() && !self.has_dir(p));
            if parent_missing {
                return Err(PressError::file(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "parent directory missing"),
                ));
            }

            self.writes.set(self.writes.get() + 1);
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path) || self.has_dir(path)
        }

        fn create_dir_all(&self, path: &Path) -> Result<()> {
            self.add_dirs(path);
            Ok(())
        }

        fn walk(&self, root: &Path) -> Result<Vec<WalkEntry>> {
            if !self.has_dir(root) {
                return Err(PressError::file(
                    root,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
                ));
            }

            let dirs = self
                .dirs
                .borrow()
                .iter()
                .filter(|d| d.starts_with(root) && d.as_path() != root)
                .map(|d| WalkEntry {
                    path: d.clone(),
                    is_dir: true,
                    is_symlink: false,
                })
                .collect::<Vec<_>>();

            let files = self
                .files
                .borrow()
                .keys()
                .filter(|f| f.starts_with(root))
                .map(|f| WalkEntry {
                    path: f.clone(),
                    is_dir: false,
                    is_symlink: false,
                })
                .collect::<Vec<_>>();

            Ok(dirs.into_iter().chain(files).collect())
        }
    }
}

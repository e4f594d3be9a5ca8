// file: src/site/sync.rs
// description: additive copy of a source tree into a build tree
// reference: content comparison before copy, skip-listed subtrees

use crate::error::Result;
use crate::site::scanner::is_skipped;
use crate::site::store::FileStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub copied: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

pub struct DirectorySync<'a> {
    store: &'a dyn FileStore,
    skip_dirs: &'a [PathBuf],
}

impl<'a> DirectorySync<'a> {
    pub fn new(store: &'a dyn FileStore, skip_dirs: &'a [PathBuf]) -> Self {
        Self { store, skip_dirs }
    }

    /// Mirrors `src` into `dest`. Files only present in `dest` are kept.
    pub fn sync(&self, src: &Path, dest: &Path) -> Result<SyncReport> {
        info!("Syncing {} -> {}", src.display(), dest.display());
        let mut report = SyncReport::default();

        self.store.create_dir_all(dest)?;

        for entry in self.store.walk(src)? {
            let relative = entry.path.strip_prefix(src).unwrap_or(&entry.path);
            let target = dest.join(relative);

            if entry.is_dir {
                if entry.is_symlink {
                    debug!("Skipped linked directory: {}", entry.path.display());
                    continue;
                }
                if is_skipped(relative, self.skip_dirs) {
                    continue;
                }
                self.store.create_dir_all(&target)?;
                continue;
            }

            let parent = relative.parent().unwrap_or(Path::new(""));
            if is_skipped(parent, self.skip_dirs) {
                report.skipped += 1;
                continue;
            }

            if self.needs_copy(&entry.path, &target)? {
                debug!("Copied: {} -> {}", entry.path.display(), target.display());
                if let Some(dir) = target.parent() {
                    self.store.create_dir_all(dir)?;
                }
                self.store.copy(&entry.path, &target)?;
                report.copied += 1;
            } else {
                debug!("Skipped (unchanged): {}", entry.path.display());
                report.unchanged += 1;
            }
        }

        info!(
            "Sync complete: {} copied, {} unchanged, {} skipped",
            report.copied, report.unchanged, report.skipped
        );
        Ok(report)
    }

    fn needs_copy(&self, src: &Path, dest: &Path) -> Result<bool> {
        if !self.store.exists(dest) {
            return Ok(true);
        }

        Ok(self.store.read(src)? != self.store.read(dest)?)
    }
}

pub fn sync_tree(
    store: &dyn FileStore,
    src: &Path,
    dest: &Path,
    skip_dirs: &[PathBuf],
) -> Result<SyncReport> {
    DirectorySync::new(store, skip_dirs).sync(src, dest)
}

// file: src/site/scanner.rs
// description: site tree walking and file discovery with skip lists
// reference: https://docs.rs/walkdir

use crate::error::Result;
use crate::site::store::FileStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteFileKind {
    Html,
    Notebook,
    Markdown,
    Other,
}

impl SiteFileKind {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("html") => Self::Html,
            Some("ipynb") => Self::Notebook,
            Some("md") => Self::Markdown,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub kind: SiteFileKind,
}

pub struct FileScanner {
    skip_dirs: Vec<PathBuf>,
}

impl FileScanner {
    pub fn new(skip_dirs: Vec<PathBuf>) -> Self {
        Self { skip_dirs }
    }

    /// Lists every file below `root` whose directory is not skipped.
    pub fn scan_directory(&self, store: &dyn FileStore, root: &Path) -> Result<Vec<ScannedFile>> {
        info!("Scanning directory: {}", root.display());
        let mut files = Vec::new();

        for entry in store.walk(root)? {
            if entry.is_dir {
                continue;
            }

            let relative_path = entry
                .path
                .strip_prefix(root)
                .unwrap_or(&entry.path)
                .to_path_buf();

            let parent = relative_path.parent().unwrap_or(Path::new(""));
            if is_skipped(parent, &self.skip_dirs) {
                debug!("Skipping file: {}", entry.path.display());
                continue;
            }

            files.push(ScannedFile {
                kind: SiteFileKind::of(&entry.path),
                path: entry.path,
                relative_path,
            });
        }

        info!("Found {} files", files.len());
        Ok(files)
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new(vec![])
    }
}

/// True when `relative_dir` equals a skip entry or lies below one.
/// Matching is anchored at the walk root: `_build` does not skip `docs/_build`.
pub fn is_skipped(relative_dir: &Path, skip_dirs: &[PathBuf]) -> bool {
    skip_dirs
        .iter()
        .any(|skip| !skip.as_os_str().is_empty() && relative_dir.starts_with(skip))
}

// file: src/links/rewriter.rs
// description: rewrites notebook launch links in generated html to the published branch
// reference: https://docs.rs/regex

use crate::error::{PressError, Result};
use crate::links::patterns::{COLAB_GITHUB_BASE, COLAB_MASTER_LINK, PUBLISHED_BRANCH};
use crate::site::scanner::SiteFileKind;
use crate::site::store::FileStore;
use regex::Captures;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub files_visited: usize,
    pub html_files: usize,
    pub files_changed: usize,
}

#[derive(Debug, Clone)]
pub struct LinkRewriter {
    prefix: String,
}

impl LinkRewriter {
    /// `prefix` is the folder on the published branch that holds notebook
    /// sources, e.g. `_sources`.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();

        if prefix.trim().is_empty() {
            return Err(PressError::Validation(
                "link prefix must not be empty".to_string(),
            ));
        }

        if prefix.starts_with('/') || prefix.ends_with('/') || prefix.contains(char::is_whitespace)
        {
            return Err(PressError::Validation(format!(
                "link prefix must be a relative path without surrounding slashes or whitespace: {:?}",
                prefix
            )));
        }

        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Borrowed output means nothing matched.
    pub fn rewrite<'t>(&self, content: &'t str) -> Cow<'t, str> {
        COLAB_MASTER_LINK.replace_all(content, |caps: &Captures| {
            format!(
                "{}/{}/{}/blob/{}/{}/{}",
                COLAB_GITHUB_BASE, &caps[1], &caps[2], PUBLISHED_BRANCH, self.prefix, &caps[3]
            )
        })
    }

    pub fn rewrite_file(&self, store: &dyn FileStore, path: &Path) -> Result<bool> {
        let content = store.read_to_string(path)?;

        match self.rewrite(&content) {
            Cow::Borrowed(_) => Ok(false),
            Cow::Owned(rewritten) => {
                store.write(path, rewritten.as_bytes())?;
                Ok(true)
            }
        }
    }

    pub fn rewrite_tree(&self, store: &dyn FileStore, root: &Path) -> Result<RewriteReport> {
        let mut report = RewriteReport::default();

        for entry in store.walk(root)? {
            if entry.is_dir {
                continue;
            }
            report.files_visited += 1;

            if SiteFileKind::of(&entry.path) != SiteFileKind::Html {
                continue;
            }
            report.html_files += 1;

            info!("replace colab link in {}", entry.path.display());
            if self.rewrite_file(store, &entry.path)? {
                report.files_changed += 1;
            } else {
                debug!("No launch links in {}", entry.path.display());
            }
        }

        info!(
            "Link rewrite complete: {} of {} html files changed",
            report.files_changed, report.html_files
        );
        Ok(report)
    }
}

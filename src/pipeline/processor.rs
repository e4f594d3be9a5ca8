// file: src/pipeline/processor.rs
// description: pre-build pass that syncs the book sources and renders every page
// reference: sync, config rewrite, then per-file rendering in walk order

use crate::config::Config;
use crate::error::Result;
use crate::notebook::{Notebook, TransformReport, transform_cells};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::site::{DirectorySync, FileScanner, FileStore, SiteFileKind};
use crate::template::{Substitutions, TemplateRenderer, set_path_to_book};
use std::path::Path;
use tracing::{debug, info};

pub struct SitePreparer<'a> {
    config: &'a Config,
    store: &'a dyn FileStore,
    renderer: TemplateRenderer,
    colored: bool,
}

impl<'a> SitePreparer<'a> {
    pub fn new(config: &'a Config, store: &'a dyn FileStore) -> Self {
        Self {
            config,
            store,
            renderer: TemplateRenderer::new(),
            colored: true,
        }
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Runs the whole pass. The first failing file aborts the run.
    pub fn run(&self, skip_sync: bool) -> Result<PipelineStats> {
        let paths = &self.config.paths;
        let skip_dirs = &self.config.sync.skip_dirs;

        let files_synced = if skip_sync {
            info!("Sync skipped");
            0
        } else {
            DirectorySync::new(self.store, skip_dirs)
                .sync(&paths.source_dir, &paths.build_dir)?
                .copied
        };

        let book_config = self.config.book_config_path();
        if let Some(path_to_book) = &self.config.render.path_to_book {
            set_path_to_book(self.store, &book_config, path_to_book)?;
        }

        let vars = Substitutions::load(
            self.store,
            &book_config,
            &self.config.render.substitutions_key,
        )?;
        info!("Loaded {} substitutions from {}", vars.len(), book_config.display());

        let pages: Vec<_> = FileScanner::new(skip_dirs.clone())
            .scan_directory(self.store, &paths.build_dir)?
            .into_iter()
            .filter(|file| matches!(file.kind, SiteFileKind::Notebook | SiteFileKind::Markdown))
            .collect();

        let tracker = ProgressTracker::with_color(pages.len(), self.colored);
        for page in &pages {
            tracker.set_message(page.relative_path.display().to_string());

            match page.kind {
                SiteFileKind::Notebook => {
                    let report = self.prepare_notebook(&page.path, &vars)?;
                    tracker.notebook_done(report.restyled());
                }
                _ => {
                    self.renderer.render_markdown(self.store, &page.path, &vars)?;
                    tracker.markdown_done();
                }
            }
        }
        tracker.finish();

        let stats = PipelineStats {
            files_synced,
            ..tracker.get_stats()
        };
        info!(
            "Prepared {} notebooks and {} markdown files ({} cells restyled)",
            stats.notebooks_rendered, stats.markdown_rendered, stats.cells_restyled
        );
        Ok(stats)
    }

    /// Render and restyle in memory, then write once.
    fn prepare_notebook(&self, path: &Path, vars: &Substitutions) -> Result<TransformReport> {
        debug!("Preparing notebook: {}", path.display());

        let source = self.store.read_to_string(path)?;
        let rendered = self.renderer.render_str(path, &source, vars)?;

        let mut notebook = Notebook::from_json_str(&rendered, path)?;
        let report = transform_cells(&mut notebook).map_err(|e| e.at(path.display()))?;
        notebook.save(self.store, path)?;

        Ok(report)
    }
}

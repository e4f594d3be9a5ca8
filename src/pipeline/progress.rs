// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for the preparation pass
// reference: uses indicatif for progress bars and tracks processing metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::cell::Cell;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub files_synced: usize,
    pub notebooks_rendered: usize,
    pub markdown_rendered: usize,
    pub cells_restyled: usize,
    pub duration_secs: f64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_processed(&self) -> usize {
        self.notebooks_rendered + self.markdown_rendered
    }

    pub fn files_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.files_processed() as f64 / self.duration_secs
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    stats: Cell<(usize, usize, usize)>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, true)
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        Self {
            bar: create_progress_bar(total_files as u64, colored),
            stats: Cell::new((0, 0, 0)),
            start_time: Instant::now(),
        }
    }

    pub fn notebook_done(&self, cells_restyled: usize) {
        let (notebooks, markdown, cells) = self.stats.get();
        self.stats.set((notebooks + 1, markdown, cells + cells_restyled));
        self.advance();
    }

    pub fn markdown_done(&self) {
        let (notebooks, markdown, cells) = self.stats.get();
        self.stats.set((notebooks, markdown + 1, cells));
        self.advance();
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        let (notebooks_rendered, markdown_rendered, cells_restyled) = self.stats.get();

        PipelineStats {
            files_synced: 0,
            notebooks_rendered,
            markdown_rendered,
            cells_restyled,
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }

    fn advance(&self) {
        self.bar.inc(1);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let (template, chars) = if colored {
        ("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}", "█▓▒░")
    } else {
        ("{spinner} [{bar:40}] {pos}/{len} {wide_msg}", "=>-")
    };

    bar.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .expect("Failed to create progress bar template")
            .progress_chars(chars),
    );
    bar
}

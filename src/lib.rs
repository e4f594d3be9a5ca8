// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod links;
pub mod notebook;
pub mod pipeline;
pub mod site;
pub mod template;
pub mod utils;

pub use config::{Config, LinksConfig, PathsConfig, RenderConfig, SyncConfig};
pub use error::{PressError, Result};
pub use links::{LinkRewriter, RewriteReport};
pub use notebook::{CellKind, Notebook, TransformReport, transform_notebook};
pub use pipeline::{PipelineStats, SitePreparer};
pub use site::{DirectorySync, DiskStore, FileScanner, FileStore, SyncReport, sync_tree};
pub use template::{Substitutions, TemplateRenderer};
pub use utils::Validator;

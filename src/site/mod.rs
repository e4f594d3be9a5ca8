// file: src/site/mod.rs
// description: Site tree operations module exports
// reference: Internal module structure

pub mod scanner;
pub mod store;
pub mod sync;

pub use scanner::{FileScanner, ScannedFile, SiteFileKind};
pub use store::{DiskStore, FileStore, WalkEntry};
pub use sync::{DirectorySync, SyncReport, sync_tree};

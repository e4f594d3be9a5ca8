// file: src/notebook/mod.rs
// description: notebook model and cell restyling module exports
// reference: internal module structure

pub mod callout;
pub mod format;
pub mod markers;
pub mod model;
pub mod transform;

pub use callout::render_callout;
pub use markers::{CellKind, MarkedCell, classify, split_marked};
pub use model::{Cell, CellSource, Notebook};
pub use transform::{TransformReport, transform_cells, transform_notebook};

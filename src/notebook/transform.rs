// file: src/notebook/transform.rs
// description: restyles exercise, hint and solution cells of a notebook
// reference: classify once per cell, then render through the callout templates

use crate::error::Result;
use crate::notebook::callout::render_callout;
use crate::notebook::markers::{CellKind, split_marked};
use crate::notebook::model::Notebook;
use crate::site::store::FileStore;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub exercises: usize,
    pub hints: usize,
    pub solutions: usize,
}

impl TransformReport {
    pub fn restyled(&self) -> usize {
        self.exercises + self.hints + self.solutions
    }

    fn count(&mut self, kind: CellKind) {
        match kind {
            CellKind::Exercise => self.exercises += 1,
            CellKind::Hint => self.hints += 1,
            CellKind::Solution => self.solutions += 1,
            CellKind::Plain => {}
        }
    }
}

/// Rewrites marked markdown cells in place. Cell count and order never change.
pub fn transform_cells(notebook: &mut Notebook) -> Result<TransformReport> {
    let mut report = TransformReport::default();

    for (index, cell) in notebook.cells.iter_mut().enumerate() {
        if !cell.is_markdown() {
            continue;
        }

        let text = cell.text();
        let marked = split_marked(&text).map_err(|e| e.at(format!("cell {}", index)))?;
        let Some(marked) = marked else {
            continue;
        };

        let block = render_callout(&marked)?;
        debug!("Restyled cell {} as {:?}", index, marked.kind);
        report.count(marked.kind);
        cell.set_text(&block);
    }

    Ok(report)
}

pub fn transform_notebook(store: &dyn FileStore, path: &Path) -> Result<TransformReport> {
    let mut notebook = Notebook::load(store, path)?;
    let report = transform_cells(&mut notebook).map_err(|e| e.at(path.display()))?;
    notebook.save(store, path)?;

    debug!("{}: {} cells restyled", path.display(), report.restyled());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PressError;
    use crate::notebook::model::{Cell, CellSource};
    use crate::site::store::MemoryStore;
    use serde_json::{Map, Value, json};

    fn notebook(cells: Vec<Cell>) -> Notebook {
        Notebook {
            cells,
            rest: Map::from_iter([("nbformat".to_string(), json!(4))]),
        }
    }

    fn code_cell(source: &str) -> Cell {
        Cell {
            cell_type: "code".to_string(),
            rest: Map::from_iter([
                ("execution_count".to_string(), Value::Null),
                ("outputs".to_string(), json!([])),
            ]),
            source: CellSource::Text(source.to_string()),
        }
    }

    #[test]
    fn test_transform_restyles_marked_cells_only() {
        let mut nb = notebook(vec![
            Cell::markdown("# Week 1"),
            Cell::markdown("### Exercise\nDo the thing."),
            code_cell("### Hint\nnot markdown"),
            Cell::markdown("### Hint\nLook left."),
            Cell::markdown("### Solution\nline1\nline2"),
        ]);

        let report = transform_cells(&mut nb).unwrap();

        assert_eq!(
            report,
            TransformReport {
                exercises: 1,
                hints: 1,
                solutions: 1,
            }
        );
        assert_eq!(nb.cells.len(), 5);
        assert_eq!(nb.cells[0].text(), "# Week 1");
        assert!(nb.cells[1].text().contains("&#129504 Exercise</h3>"));
        assert_eq!(nb.cells[2], code_cell("### Hint\nnot markdown"));
        assert!(nb.cells[3].text().contains("&#128269 Hint</summary>"));
        assert!(nb.cells[4].text().contains("&#128273 Solution</summary>"));
    }

    #[test]
    fn test_transform_reports_cell_index_on_ambiguity() {
        let mut nb = notebook(vec![
            Cell::markdown("intro"),
            Cell::markdown("### Exercise\n### Solution"),
        ]);

        let err = transform_cells(&mut nb).unwrap_err();
        assert!(matches!(err, PressError::Validation(message) if message.starts_with("cell 1: ")));
    }

    #[test]
    fn test_transform_notebook_persists_lines_representation() {
        let store = MemoryStore::new();
        store.insert(
            "site/week1.ipynb",
            r####"{"cells": [{"cell_type": "markdown", "metadata": {}, "source": ["### Hint\n", "Look left."]}], "metadata": {}, "nbformat": 4, "nbformat_minor": 5}"####,
        );

        let report = transform_notebook(&store, Path::new("site/week1.ipynb")).unwrap();
        assert_eq!(report.hints, 1);

        let saved: Value = serde_json::from_str(&store.contents("site/week1.ipynb").unwrap()).unwrap();
        let source = saved["cells"][0]["source"].as_array().unwrap();
        assert!(source.len() > 1);
        let joined: String = source.iter().filter_map(Value::as_str).collect();
        assert!(joined.contains("<details>"));
        assert!(joined.contains("Look left."));
    }

    #[test]
    fn test_transform_notebook_error_names_file() {
        let store = MemoryStore::new();
        store.insert(
            "site/bad.ipynb",
            r#"{"cells": [{"cell_type": "markdown", "metadata": {}, "source": "text\n### Hint"}]}"#,
        );

        let err = transform_notebook(&store, Path::new("site/bad.ipynb")).unwrap_err();
        assert!(
            matches!(err, PressError::Validation(message) if message.starts_with("site/bad.ipynb: cell 0: "))
        );
        assert_eq!(store.writes(), 0);
    }
}

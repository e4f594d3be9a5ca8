// file: src/notebook/model.rs
// description: nbformat v4 notebook model that preserves unknown fields
// reference: https://nbformat.readthedocs.io/en/latest/format_description.html

use crate::error::{PressError, Result};
use crate::notebook::format::to_notebook_json;
use crate::site::store::FileStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    /// metadata, nbformat, nbformat_minor and anything else, kept as-is
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
    #[serde(default)]
    pub source: CellSource,
}

/// nbformat allows either one string or a list of lines on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        Self::Lines(Vec::new())
    }
}

impl CellSource {
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Lines(lines) => lines.concat(),
        }
    }

    /// Replaces the text, keeping the on-disk representation.
    pub fn set_text(&mut self, text: &str) {
        *self = if matches!(self, Self::Text(_)) {
            Self::Text(text.to_string())
        } else {
            Self::Lines(text.split_inclusive('\n').map(str::to_string).collect())
        };
    }
}

impl Cell {
    pub fn markdown(text: &str) -> Self {
        Self {
            cell_type: "markdown".to_string(),
            rest: Map::from_iter([("metadata".to_string(), Value::Object(Map::new()))]),
            source: CellSource::Text(text.to_string()),
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.cell_type == "markdown"
    }

    pub fn text(&self) -> String {
        self.source.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.source.set_text(text);
    }
}

impl Notebook {
    pub fn from_json_str(content: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| PressError::Notebook {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn to_json_string(&self, origin: &Path) -> Result<String> {
        to_notebook_json(self).map_err(|e| PressError::Notebook {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(store: &dyn FileStore, path: &Path) -> Result<Self> {
        let content = store.read_to_string(path)?;
        Self::from_json_str(&content, path)
    }

    pub fn save(&self, store: &dyn FileStore, path: &Path) -> Result<()> {
        let content = self.to_json_string(path)?;
        store.write(path, content.as_bytes())
    }
}

// file: src/template/renderer.rs
// description: placeholder substitution for notebook and markdown documents
// reference: https://docs.rs/minijinja

use crate::error::{PressError, Result};
use crate::notebook::format::to_notebook_json;
use crate::site::store::FileStore;
use crate::template::substitutions::Substitutions;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::path::Path;
use tracing::debug;

/// Jinja-compatible renderer. Unknown placeholders are errors, output is
/// never HTML-escaped.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        Self { env }
    }

    /// `origin` only labels errors.
    pub fn render_str(&self, origin: &Path, source: &str, vars: &Substitutions) -> Result<String> {
        self.env
            .render_str(source, vars.as_context())
            .map_err(|e| PressError::template(origin, &e))
    }

    pub fn render_markdown(
        &self,
        store: &dyn FileStore,
        path: &Path,
        vars: &Substitutions,
    ) -> Result<()> {
        debug!("Rendering markdown: {}", path.display());
        let source = store.read_to_string(path)?;
        let rendered = self.render_str(path, &source, vars)?;
        store.write(path, rendered.as_bytes())
    }

    /// Renders the raw notebook text, then checks it is still JSON and
    /// re-serializes it with one-space indentation.
    pub fn render_notebook(
        &self,
        store: &dyn FileStore,
        path: &Path,
        vars: &Substitutions,
    ) -> Result<()> {
        debug!("Rendering notebook: {}", path.display());
        let source = store.read_to_string(path)?;
        let rendered = self.render_str(path, &source, vars)?;

        let document: serde_json::Value =
            serde_json::from_str(&rendered).map_err(|e| PressError::Notebook {
                path: path.to_path_buf(),
                message: format!("invalid JSON after rendering: {}", e),
            })?;

        let output = to_notebook_json(&document).map_err(|e| PressError::Notebook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        store.write(path, output.as_bytes())
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

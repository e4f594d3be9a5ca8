// file: src/template/book_config.rs
// description: edits to the book's YAML config in the build tree
// reference: https://docs.rs/yaml-rust

use crate::error::{PressError, Result};
use crate::site::store::FileStore;
use std::path::Path;
use tracing::info;
use yaml_rust::yaml::Hash;
use yaml_rust::{Yaml, YamlEmitter, YamlLoader};

/// Points `repository.path_to_book` at `value`, creating the `repository`
/// section when absent. Comments in the file are not preserved.
pub fn set_path_to_book(store: &dyn FileStore, path: &Path, value: &str) -> Result<()> {
    let content = store.read_to_string(path)?;
    let updated = with_path_to_book(&content, value, path)?;
    store.write(path, updated.as_bytes())?;

    info!("Set repository.path_to_book = {} in {}", value, path.display());
    Ok(())
}

fn with_path_to_book(content: &str, value: &str, origin: &Path) -> Result<String> {
    let yaml_error = |message: String| PressError::Yaml {
        path: origin.to_path_buf(),
        message,
    };

    let mut docs = YamlLoader::load_from_str(content).map_err(|e| yaml_error(e.to_string()))?;
    if docs.is_empty() {
        docs.push(Yaml::Hash(Hash::new()));
    }

    let Some(Yaml::Hash(root)) = docs.first_mut() else {
        return Err(yaml_error("top level must be a mapping".to_string()));
    };

    let repository_key = Yaml::String("repository".to_string());
    if !root.contains_key(&repository_key) {
        root.insert(repository_key.clone(), Yaml::Hash(Hash::new()));
    }

    match root.get_mut(&repository_key) {
        Some(Yaml::Hash(repository)) => {
            repository.insert(
                Yaml::String("path_to_book".to_string()),
                Yaml::String(value.to_string()),
            );
        }
        _ => return Err(yaml_error("`repository` must be a mapping".to_string())),
    }

    let mut out = String::new();
    YamlEmitter::new(&mut out)
        .dump(&docs[0])
        .map_err(|e| yaml_error(format!("{:?}", e)))?;
    out.push('\n');

    Ok(out)
}

// file: src/template/substitutions.rs
// description: myst substitution variables loaded from the book's YAML config
// reference: https://docs.rs/yaml-rust

use crate::error::{PressError, Result};
use crate::site::store::FileStore;
use serde_json::{Map, Number, Value};
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

pub const DEFAULT_SUBSTITUTIONS_KEY: &str = "parse.myst_substitutions";

/// Variables handed to the template engine for a single render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitutions {
    values: Map<String, Value>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &dyn FileStore, path: &Path, key_path: &str) -> Result<Self> {
        let content = store.read_to_string(path)?;
        Self::from_yaml_str(&content, key_path, path)
    }

    /// `key_path` is dotted, e.g. `parse.myst_substitutions`.
    pub fn from_yaml_str(content: &str, key_path: &str, origin: &Path) -> Result<Self> {
        let docs = YamlLoader::load_from_str(content).map_err(|e| PressError::Yaml {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let root = docs.into_iter().next().unwrap_or(Yaml::Null);
        let node = lookup(&root, key_path).ok_or_else(|| {
            PressError::Config(format!(
                "{}: missing key `{}`",
                origin.display(),
                key_path
            ))
        })?;

        match yaml_to_json(node) {
            Value::Object(values) => Ok(Self { values }),
            other => Err(PressError::Config(format!(
                "{}: `{}` must be a mapping, found {}",
                origin.display(),
                key_path,
                json_kind(&other)
            ))),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_context(&self) -> &Map<String, Value> {
        &self.values
    }
}

fn lookup<'y>(root: &'y Yaml, key_path: &str) -> Option<&'y Yaml> {
    key_path
        .split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(root, |node, segment| {
            let child = &node[segment];
            if child.is_badvalue() { None } else { Some(child) }
        })
}

fn yaml_to_json(node: &Yaml) -> Value {
    match node {
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Integer(i) => Value::Number((*i).into()),
        Yaml::Real(raw) => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.clone())),
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Array(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        Yaml::Hash(hash) => Value::Object(
            hash.iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_json(value)))
                .collect(),
        ),
        Yaml::Null | Yaml::Alias(_) | Yaml::BadValue => Value::Null,
    }
}

fn yaml_key(key: &Yaml) -> String {
    match key {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => format!("{:?}", other),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PressError, Result};
use crate::links::LinkRewriter;
use crate::site::scanner::is_skipped;
use crate::template::DEFAULT_SUBSTITUTIONS_KEY;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub links: LinksConfig,
    pub sync: SyncConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Book sources as authored.
    pub source_dir: PathBuf,
    /// Working copy that gets rendered and handed to the site generator.
    pub build_dir: PathBuf,
    /// Generated html pages whose launch links get rewritten.
    pub html_dir: PathBuf,
    /// Book config file name, relative to `build_dir`.
    pub book_config: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinksConfig {
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub skip_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    pub substitutions_key: String,
    #[serde(default)]
    pub path_to_book: Option<String>,
}

impl Config {
    /// Layers built-in defaults, the TOML file and `NBPRESS__*` variables.
    /// A missing file is not an error; the defaults and environment still apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        Self::load_from(path, None)
    }

    /// `env` replaces the process environment when given.
    fn load_from(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PressError::Config(e.to_string()))?;

        let path = path.unwrap_or(Path::new("config/default.toml"));
        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults and environment",
                path.display()
            );
        }

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("NBPRESS")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| PressError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PressError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            paths: PathsConfig {
                source_dir: PathBuf::from("./website"),
                build_dir: PathBuf::from("./_website_build"),
                html_dir: PathBuf::from("./website/_build/html/content"),
                book_config: PathBuf::from("_config.yml"),
            },
            links: LinksConfig {
                prefix: "_sources".to_string(),
            },
            sync: SyncConfig {
                skip_dirs: vec![PathBuf::from("_build")],
            },
            render: RenderConfig {
                substitutions_key: DEFAULT_SUBSTITUTIONS_KEY.to_string(),
                path_to_book: None,
            },
        }
    }

    pub fn book_config_path(&self) -> PathBuf {
        self.paths.build_dir.join(&self.paths.book_config)
    }

    pub fn validate(&self) -> Result<()> {
        LinkRewriter::new(self.links.prefix.as_str())
            .map_err(|e| PressError::Config(format!("links.prefix: {}", e)))?;

        if self.render.substitutions_key.trim().is_empty() {
            return Err(PressError::Config(
                "render.substitutions_key must not be empty".to_string(),
            ));
        }

        if self
            .render
            .path_to_book
            .as_deref()
            .is_some_and(|p| p.trim().is_empty())
        {
            return Err(PressError::Config(
                "render.path_to_book must not be empty when set".to_string(),
            ));
        }

        let source_dir = normalize_path(&self.paths.source_dir);
        let build_dir = normalize_path(&self.paths.build_dir);
        if source_dir == build_dir {
            return Err(PressError::Config(
                "paths.source_dir and paths.build_dir must differ".to_string(),
            ));
        }

        if let Ok(nested) = build_dir.strip_prefix(&source_dir)
            && !is_skipped(nested, &self.sync.skip_dirs)
        {
            return Err(PressError::Config(format!(
                "paths.build_dir lies inside paths.source_dir; add {} to sync.skip_dirs",
                nested.display()
            )));
        }

        Ok(())
    }
}

/// Absolute form of `path` for comparisons. Falls back to joining the
/// working directory when the path does not exist yet.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.book_config_path(),
            PathBuf::from("./_website_build/_config.yml")
        );
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nbpress.toml");
        fs::write(
            &path,
            "[links]\nprefix = \"sources\"\n\n[render]\npath_to_book = \"_book_build\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.as_path()), Some(config::Map::new())).unwrap();

        assert_eq!(config.links.prefix, "sources");
        assert_eq!(config.render.path_to_book.as_deref(), Some("_book_build"));
        assert_eq!(config.render.substitutions_key, DEFAULT_SUBSTITUTIONS_KEY);
        assert_eq!(config.sync.skip_dirs, vec![PathBuf::from("_build")]);
    }

    #[test]
    fn test_invalid_prefix_rejected() {
        let mut config = Config::default_config();
        config.links.prefix = "/_sources/".to_string();

        assert!(matches!(config.validate(), Err(PressError::Config(_))));
    }

    #[test]
    fn test_same_source_and_build_dir_rejected() {
        let mut config = Config::default_config();
        config.paths.build_dir = config.paths.source_dir.clone();
        assert!(config.validate().is_err());

        config.paths.source_dir = PathBuf::from("./website");
        config.paths.build_dir = PathBuf::from("website");
        assert!(matches!(config.validate(), Err(PressError::Config(_))));
    }

    #[test]
    fn test_nested_build_dir_must_be_skipped() {
        let mut config = Config::default_config();
        config.paths.source_dir = PathBuf::from("./website");
        config.paths.build_dir = PathBuf::from("website/_out");

        match config.validate() {
            Err(PressError::Config(message)) => assert!(message.contains("_out")),
            other => panic!("unexpected result: {other:?}"),
        }

        config.paths.build_dir = PathBuf::from("website/_build/book");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_still_applies_env_overrides() {
        let temp = TempDir::new().unwrap();
        let env = config::Map::from_iter([
            ("NBPRESS__LINKS__PREFIX".to_string(), "sources".to_string()),
            ("NBPRESS__PATHS__BUILD_DIR".to_string(), "./out".to_string()),
        ]);

        let config =
            Config::load_from(Some(temp.path().join("absent.toml").as_path()), Some(env)).unwrap();

        assert_eq!(config.links.prefix, "sources");
        assert_eq!(config.paths.build_dir, PathBuf::from("./out"));
        assert_eq!(config.paths.source_dir, PathBuf::from("./website"));
    }

    #[test]
    fn test_invalid_env_override_rejected() {
        let temp = TempDir::new().unwrap();
        let env = config::Map::from_iter([(
            "NBPRESS__LINKS__PREFIX".to_string(),
            "/bad/".to_string(),
        )]);

        let result = Config::load_from(Some(temp.path().join("absent.toml").as_path()), Some(env));
        assert!(matches!(result, Err(PressError::Config(_))));
    }
}

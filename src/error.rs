// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PressError>;

#[derive(Error, Debug)]
pub enum PressError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("YAML error in {path}: {message}")]
    Yaml { path: PathBuf, message: String },

    #[error("Template error in {path}: {message}")]
    Template { path: PathBuf, message: String },

    #[error("Malformed notebook {path}: {message}")]
    Notebook { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl PressError {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOperation {
            path: path.into(),
            source,
        }
    }

    /// Prefixes a validation message with where it happened.
    pub fn at(self, location: impl std::fmt::Display) -> Self {
        match self {
            Self::Validation(message) => Self::Validation(format!("{}: {}", location, message)),
            other => other,
        }
    }

    pub fn template(path: impl Into<PathBuf>, err: &minijinja::Error) -> Self {
        use std::error::Error as _;

        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }

        Self::Template {
            path: path.into(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_names_path() {
        let err = PressError::file(
            "site/index.html",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );

        let message = err.to_string();
        assert!(message.contains("site/index.html"));
        assert!(message.contains("gone"));
    }
}

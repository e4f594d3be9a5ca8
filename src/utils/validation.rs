// file: src/utils/validation.rs
// description: argument validation for paths handed to the passes
// reference: input validation patterns

use crate::error::{PressError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(PressError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(PressError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_file(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(PressError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_extension(path: &Path, allowed: &[&str]) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if allowed.contains(&ext) => Ok(()),
            _ => Err(PressError::Validation(format!(
                "Expected a .{} file: {}",
                allowed.join(" or ."),
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("page.html");
        fs::write(&file, "").unwrap();

        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(&file).is_err());
        assert!(Validator::validate_directory(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_validate_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("intro.md");
        fs::write(&file, "# Intro").unwrap();

        assert!(Validator::validate_file(&file).is_ok());
        assert!(Validator::validate_file(temp.path()).is_err());
    }

    #[test]
    fn test_validate_extension() {
        let allowed = ["ipynb", "md"];

        assert!(Validator::validate_extension(Path::new("a/intro.ipynb"), &allowed).is_ok());
        assert!(Validator::validate_extension(Path::new("intro.md"), &allowed).is_ok());

        let err = Validator::validate_extension(Path::new("intro.html"), &allowed).unwrap_err();
        assert!(err.to_string().contains("ipynb or .md"));
    }
}

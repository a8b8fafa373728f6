//! Path validation utilities
//!
//! Provides centralized validation for file paths and directories.

use crate::error::{PrepError, Result};
use std::path::Path;

/// Validator for file system paths
pub struct PathValidator;

impl PathValidator {
    /// Validate that a path exists
    pub fn validate_file_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(PrepError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File does not exist: {}", path_ref.display()),
            )));
        }
        Ok(())
    }

    /// Validate that a path is an existing, readable directory
    ///
    /// Missing or non-directory dataset roots are a reported condition, not a
    /// panic, so this maps straight to [`PrepError::MissingRoot`].
    pub fn validate_is_directory<P: AsRef<Path>>(path: P) -> Result<()> {
        let path_ref = path.as_ref();
        if !path_ref.is_dir() {
            return Err(PrepError::missing_root(path_ref));
        }
        Ok(())
    }

    /// Create parent directories if they don't exist
    pub fn ensure_parent_dirs<P: AsRef<Path>>(path: P) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PrepError::file_io_error("create parent directory", parent, e)
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_exists() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        assert!(PathValidator::validate_file_exists(&file_path).is_err());

        fs::write(&file_path, "test").unwrap();
        assert!(PathValidator::validate_file_exists(&file_path).is_ok());
    }

    #[test]
    fn test_validate_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("subdir");
        let file_path = temp_dir.path().join("file.txt");

        let missing = PathValidator::validate_is_directory(&dir_path);
        assert!(matches!(missing, Err(PrepError::MissingRoot(_))));

        fs::create_dir(&dir_path).unwrap();
        assert!(PathValidator::validate_is_directory(&dir_path).is_ok());

        fs::write(&file_path, "test").unwrap();
        assert!(PathValidator::validate_is_directory(&file_path).is_err());
    }

    #[test]
    fn test_ensure_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        assert!(!nested_path.parent().unwrap().exists());

        assert!(PathValidator::ensure_parent_dirs(&nested_path).is_ok());
        assert!(nested_path.parent().unwrap().exists());
    }
}

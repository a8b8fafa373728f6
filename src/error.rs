//! Error types for dataset preparation operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset preparation operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Error types for structure validation and image normalization
#[derive(Error, Debug)]
pub enum PrepError {
    /// A dataset root directory does not exist or is not a directory
    #[error("Dataset root missing or not a directory: {0}")]
    MissingRoot(PathBuf),

    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode or encode errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Per-file processing errors
    #[error("Processing error: {0}")]
    Processing(String),
}

impl PrepError {
    /// Create a missing-root error for a dataset root path
    pub fn missing_root<P: Into<PathBuf>>(path: P) -> Self {
        Self::MissingRoot(path.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new processing error
    pub fn processing<S: Into<String>>(msg: S) -> Self {
        Self::Processing(msg.into())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }
}

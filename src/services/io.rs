//! Image I/O operations service
//!
//! This module separates file I/O operations from the tree-walk logic,
//! making the pipeline more testable and maintainable.

use crate::{
    config::ContainerFormat,
    error::{PrepError, Result},
};
use image::DynamicImage;
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Tries extension-based format detection first and falls back to
    /// content-based detection, so mislabeled or extension-less files still
    /// decode when their bytes are a supported format.
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(PrepError::file_io_error(
                "read image file",
                path_ref,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    PrepError::file_io_error("read image data", path_ref, io_err)
                })?;

                image::load_from_memory(&data).map_err(|content_err| {
                    let extension = path_ref
                        .extension()
                        .and_then(|s| s.to_str())
                        .unwrap_or("unknown");

                    PrepError::processing(format!(
                        "Failed to decode '{}' with both extension-based ({}) and content-based detection. Extension error: {}. Content error: {}",
                        path_ref.display(),
                        extension,
                        e,
                        content_err
                    ))
                })
            },
        }
    }

    /// Save an image to a file in the given container format
    ///
    /// Creates the parent directory if it does not exist and overwrites any
    /// existing file at the destination path.
    pub fn save_image<P: AsRef<Path>>(
        image: &DynamicImage,
        path: P,
        format: ContainerFormat,
    ) -> Result<()> {
        let path_ref = path.as_ref();

        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PrepError::file_io_error("create output directory", parent, e))?;
        }

        image
            .save_with_format(path_ref, format.image_format())
            .map_err(|e| {
                PrepError::processing(format!(
                    "Failed to save as {}: {} (path: {})",
                    format,
                    e,
                    path_ref.display()
                ))
            })
    }
}

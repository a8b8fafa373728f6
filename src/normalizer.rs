//! Canonical image normalization over a mirrored directory tree
//!
//! The normalizer walks an input tree depth-first, recreates its directory
//! structure under an output root, and rewrites every leaf file as a
//! fixed-size, fixed-depth raster in the configured container format. Label
//! directories pass through untouched; only leaf files are transformed. A
//! file that fails to decode or write is skipped with a diagnostic, never
//! aborting the walk.

use crate::config::{ColorDepth, NormalizationConfig};
use crate::error::Result;
use crate::services::{ImageIOService, NoOpProgressReporter, ProgressReporter};
use crate::utils::PathValidator;
use image::imageops::{self, FilterType};
use image::DynamicImage;
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A source file the tree walk could not convert
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Path of the offending source file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of one normalization tree walk
#[derive(Debug, Default, Serialize)]
pub struct NormalizationSummary {
    /// Number of files successfully converted
    pub converted: usize,
    /// Files skipped with their failure reasons
    pub skipped: Vec<SkippedFile>,
}

/// Rewrites arbitrary image trees into canonical fixed-size raster trees
pub struct ImageNormalizer {
    config: NormalizationConfig,
    reporter: Box<dyn ProgressReporter>,
}

impl ImageNormalizer {
    /// Create a normalizer with the given configuration
    #[must_use]
    pub fn new(config: NormalizationConfig) -> Self {
        Self {
            config,
            reporter: Box::new(NoOpProgressReporter),
        }
    }

    /// Create a normalizer that reports per-file progress to `reporter`
    #[must_use]
    pub fn with_reporter(config: NormalizationConfig, reporter: Box<dyn ProgressReporter>) -> Self {
        Self { config, reporter }
    }

    /// The configuration this normalizer renders to
    #[must_use]
    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Mirror `input_root` into `output_root`, normalizing every leaf file
    ///
    /// The input root must be an existing directory; the output root and all
    /// intermediate directories are created on demand. Existing output files
    /// are overwritten. Per-file failures are collected in the summary and
    /// never abort the walk.
    pub fn normalize_tree<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_root: P,
        output_root: Q,
    ) -> Result<NormalizationSummary> {
        let input_root = input_root.as_ref();
        let output_root = output_root.as_ref();

        PathValidator::validate_is_directory(input_root)?;
        fs::create_dir_all(output_root)
            .map_err(|e| crate::PrepError::file_io_error("create output root", output_root, e))?;

        let mut summary = NormalizationSummary::default();

        // Explicit work stack of pending (input, output) directory pairs
        // instead of call recursion; depth is bounded by heap, not stack.
        let mut pending = vec![(input_root.to_path_buf(), output_root.to_path_buf())];

        while let Some((in_dir, out_dir)) = pending.pop() {
            let entries = match fs::read_dir(&in_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Cannot read directory {}: {}", in_dir.display(), e);
                    continue;
                },
            };

            for entry in entries {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        warn!("Cannot read entry under {}: {}", in_dir.display(), e);
                        continue;
                    },
                };

                if path.is_dir() {
                    let out_sub = match path.file_name() {
                        Some(name) => out_dir.join(name),
                        None => continue,
                    };
                    if let Err(e) = fs::create_dir_all(&out_sub) {
                        warn!("Cannot create {}: {}", out_sub.display(), e);
                        self.record_skip(&mut summary, path, e.to_string());
                        continue;
                    }
                    pending.push((path, out_sub));
                } else {
                    self.normalize_entry(&path, &out_dir, &mut summary);
                }
            }
        }

        Ok(summary)
    }

    /// Normalize one leaf file into its mirrored destination
    fn normalize_entry(&self, path: &Path, out_dir: &Path, summary: &mut NormalizationSummary) {
        let Some(name) = path.file_name() else {
            return;
        };
        let dest = out_dir
            .join(name)
            .with_extension(self.config.container_format.extension());

        match self.normalize_file(path, &dest) {
            Ok(()) => {
                summary.converted += 1;
                self.reporter.file_converted(path, &dest);
            },
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                self.reporter.file_skipped(path, &e.to_string());
                self.record_skip(summary, path.to_path_buf(), e.to_string());
            },
        }
    }

    fn record_skip(&self, summary: &mut NormalizationSummary, path: PathBuf, reason: String) {
        summary.skipped.push(SkippedFile { path, reason });
    }

    /// Decode a single source file, render it canonically, and write it out
    ///
    /// Overwrites any existing file at `output`.
    pub fn normalize_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output: Q) -> Result<()> {
        let input = input.as_ref();
        let output = output.as_ref();

        let image = ImageIOService::load_image(input)?;
        let canonical = self.render_canonical(&image);
        ImageIOService::save_image(&canonical, output, self.config.container_format)?;

        debug!("Converted {} -> {}", input.display(), output.display());
        Ok(())
    }

    /// Stretch to the target dimensions and re-render to the target depth
    ///
    /// Aspect ratio is intentionally not preserved. An image already at the
    /// target dimensions skips the resample entirely, keeping repeated runs
    /// over canonical trees byte-stable.
    #[must_use]
    pub fn render_canonical(&self, image: &DynamicImage) -> DynamicImage {
        let width = self.config.target_width;
        let height = self.config.target_height;

        match self.config.color_depth {
            ColorDepth::Rgb8 => {
                // to_rgb8 discards any alpha channel
                let rgb = image.to_rgb8();
                let canvas = if rgb.dimensions() == (width, height) {
                    rgb
                } else {
                    imageops::resize(&rgb, width, height, FilterType::Triangle)
                };
                DynamicImage::ImageRgb8(canvas)
            },
            ColorDepth::Luma8 => {
                let luma = image.to_luma8();
                let canvas = if luma.dimensions() == (width, height) {
                    luma
                } else {
                    imageops::resize(&luma, width, height, FilterType::Triangle)
                };
                DynamicImage::ImageLuma8(canvas)
            },
        }
    }
}

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Dataset Preparation Library
//!
//! Prepares image datasets for supervised classification: validates that a
//! train split and a test split share an identical label taxonomy, and
//! normalizes arbitrary source images (heterogeneous formats, sizes, and
//! color depths) into a canonical fixed-size, fixed-format representation
//! while preserving directory-encoded labels.
//!
//! The two components are independent and compose only through the
//! filesystem: normalize a source corpus into `dataset/train/<label>/*.bmp`,
//! then check the result against a separately prepared `dataset/test` tree.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dataset_prep::{ImageNormalizer, NormalizationConfig, StructureValidator};
//!
//! # fn example() -> dataset_prep::Result<()> {
//! // Normalize a raw corpus into the canonical train tree
//! let normalizer = ImageNormalizer::new(NormalizationConfig::default());
//! let summary = normalizer.normalize_tree("raw_images/", "dataset/train")?;
//! println!("converted {}, skipped {}", summary.converted, summary.skipped.len());
//!
//! // Confirm both splits use the same labels
//! let report = StructureValidator::validate("dataset/train", "dataset/test")?;
//! assert!(report.is_consistent());
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom canonical layouts
//!
//! The 64x64 RGB8 BMP default is a configuration value, not a constant:
//!
//! ```rust,no_run
//! use dataset_prep::{ColorDepth, ContainerFormat, ImageNormalizer, NormalizationConfig};
//!
//! # fn example() -> dataset_prep::Result<()> {
//! let config = NormalizationConfig::builder()
//!     .target_width(32)
//!     .target_height(32)
//!     .color_depth(ColorDepth::Luma8)
//!     .container_format(ContainerFormat::Png)
//!     .build()?;
//! ImageNormalizer::new(config).normalize_tree("raw/", "dataset/train")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Library vs CLI Usage
//!
//! All core functionality is available as a library by default; enable the
//! `cli` feature (on by default) for the `dataset-prep` command-line tool.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod utils;
pub mod validator;

// Public API exports
pub use config::{
    ColorDepth, ContainerFormat, NormalizationConfig, NormalizationConfigBuilder,
};
pub use error::{PrepError, Result};
pub use normalizer::{ImageNormalizer, NormalizationSummary, SkippedFile};
pub use services::{ImageIOService, NoOpProgressReporter, ProgressReporter};
pub use utils::PathValidator;
pub use validator::{StructureReport, StructureValidator, NOISE_ENTRY_NAME};

#[cfg(feature = "cli")]
pub use tracing_config::{TracingConfig, TracingFormat};

use std::path::Path;

/// Check that two dataset splits share one label taxonomy
///
/// Convenience wrapper over [`StructureValidator::validate`] for the common
/// `dataset/train` vs `dataset/test` comparison.
pub fn check_dataset_structure<P: AsRef<Path>, Q: AsRef<Path>>(
    train_root: P,
    test_root: Q,
) -> Result<StructureReport> {
    StructureValidator::validate(train_root, test_root)
}

/// Normalize an image tree with the canonical default configuration
///
/// Convenience wrapper over [`ImageNormalizer::normalize_tree`] using the
/// 64x64, 3-channel RGB, BMP defaults.
pub fn normalize_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_root: P,
    output_root: Q,
) -> Result<NormalizationSummary> {
    ImageNormalizer::new(NormalizationConfig::default()).normalize_tree(input_root, output_root)
}

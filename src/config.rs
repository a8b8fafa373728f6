//! Configuration types for the dataset preparation pipeline

use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};

/// Container format for normalized output images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// Uncompressed bitmap (canonical default for training corpora)
    Bmp,
    /// PNG, lossless compression
    Png,
    /// JPEG, lossy compression
    Jpeg,
}

impl ContainerFormat {
    /// File extension written for this format (without leading dot)
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Corresponding `image` crate format
    #[must_use]
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl Default for ContainerFormat {
    fn default() -> Self {
        Self::Bmp
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bmp => write!(f, "bmp"),
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// Pixel layout every normalized image is re-rendered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorDepth {
    /// 3 bytes per pixel, alpha discarded
    Rgb8,
    /// Single luminance byte per pixel
    Luma8,
}

impl Default for ColorDepth {
    fn default() -> Self {
        Self::Rgb8
    }
}

impl std::fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rgb8 => write!(f, "rgb8"),
            Self::Luma8 => write!(f, "luma8"),
        }
    }
}

/// Canonical raster layout produced by the normalizer
///
/// Every output image has exactly `target_width` x `target_height` pixels in
/// the configured color depth, encoded in the configured container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Output width in pixels
    pub target_width: u32,
    /// Output height in pixels
    pub target_height: u32,
    /// Output pixel layout
    pub color_depth: ColorDepth,
    /// Output container format
    pub container_format: ContainerFormat,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            target_width: 64,
            target_height: 64,
            color_depth: ColorDepth::Rgb8,
            container_format: ContainerFormat::Bmp,
        }
    }
}

impl NormalizationConfig {
    /// Create a builder for custom configurations
    #[must_use]
    pub fn builder() -> NormalizationConfigBuilder {
        NormalizationConfigBuilder::default()
    }
}

/// Builder for [`NormalizationConfig`]
#[derive(Debug, Default)]
pub struct NormalizationConfigBuilder {
    config: NormalizationConfig,
}

impl NormalizationConfigBuilder {
    /// Set output width in pixels
    #[must_use]
    pub fn target_width(mut self, width: u32) -> Self {
        self.config.target_width = width;
        self
    }

    /// Set output height in pixels
    #[must_use]
    pub fn target_height(mut self, height: u32) -> Self {
        self.config.target_height = height;
        self
    }

    /// Set output pixel layout
    #[must_use]
    pub fn color_depth(mut self, depth: ColorDepth) -> Self {
        self.config.color_depth = depth;
        self
    }

    /// Set output container format
    #[must_use]
    pub fn container_format(mut self, format: ContainerFormat) -> Self {
        self.config.container_format = format;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<NormalizationConfig> {
        if self.config.target_width == 0 {
            return Err(PrepError::invalid_config("target width must be non-zero"));
        }
        if self.config.target_height == 0 {
            return Err(PrepError::invalid_config("target height must be non-zero"));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_canonical() {
        let config = NormalizationConfig::default();
        assert_eq!(config.target_width, 64);
        assert_eq!(config.target_height, 64);
        assert_eq!(config.color_depth, ColorDepth::Rgb8);
        assert_eq!(config.container_format, ContainerFormat::Bmp);
    }

    #[test]
    fn test_builder_custom_dimensions() {
        let config = NormalizationConfig::builder()
            .target_width(8)
            .target_height(6)
            .container_format(ContainerFormat::Png)
            .build()
            .unwrap();
        assert_eq!(config.target_width, 8);
        assert_eq!(config.target_height, 6);
        assert_eq!(config.container_format, ContainerFormat::Png);
    }

    #[test]
    fn test_builder_rejects_zero_dimensions() {
        assert!(NormalizationConfig::builder()
            .target_width(0)
            .build()
            .is_err());
        assert!(NormalizationConfig::builder()
            .target_height(0)
            .build()
            .is_err());
    }

    #[test]
    fn test_container_format_extensions() {
        assert_eq!(ContainerFormat::Bmp.extension(), "bmp");
        assert_eq!(ContainerFormat::Png.extension(), "png");
        assert_eq!(ContainerFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = NormalizationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: NormalizationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

//! Conversion configuration types

use std::path::PathBuf;

use crate::image_pipeline::crop::{CENTROID_CROP_HALF_WIDTH, CropWindow};

/// How the crop window is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Use the given bounds as-is
    Manual(CropWindow),
    /// Center a fixed-size window on the brightness centroid
    Centroid,
}

/// Where the result goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write `<stem>.fits` (and `<stem>_reduced.fits` when cropping)
    #[default]
    Write,
    /// Display the images; nothing is written
    Plot,
}

/// Configuration for RAW to FITS conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Crop request, `None` to keep only the full image
    pub crop: Option<CropMode>,
    /// Write files or display
    pub output: OutputMode,
    /// Half the side of the centroid window
    pub centroid_half_width: i64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            crop: None,
            output: OutputMode::Write,
            centroid_half_width: CENTROID_CROP_HALF_WIDTH,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    crop: Option<Option<CropMode>>,
    output: Option<OutputMode>,
    centroid_half_width: Option<i64>,
}

impl ConversionConfigBuilder {
    pub fn crop(mut self, crop: Option<CropMode>) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = Some(output);
        self
    }

    pub fn centroid_half_width(mut self, half_width: i64) -> Self {
        self.centroid_half_width = Some(half_width);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            crop: self.crop.unwrap_or(default.crop),
            output: self.output.unwrap_or(default.output),
            centroid_half_width: self.centroid_half_width.unwrap_or(default.centroid_half_width),
        }
    }
}

/// What a conversion run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub width: usize,
    pub height: usize,
    /// Effective crop window, when cropping was requested
    pub crop_window: Option<CropWindow>,
    /// FITS files written, in order
    pub written: Vec<PathBuf>,
}

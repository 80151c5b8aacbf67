//! Pipeline conversions module
//!
//! This module contains the orchestration of the RAW to FITS conversion.

mod raw_to_fits;
pub mod types;

#[cfg(test)]
mod tests;

pub use raw_to_fits::{CroppedImage, ProcessedImage, RawToFitsPipeline};
pub use types::{ConversionConfig, ConversionConfigBuilder, ConversionReport, CropMode, OutputMode};

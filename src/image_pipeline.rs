//! Image processing pipeline module
//!
//! This module provides a structured approach to turning camera RAW files into
//! FITS images, with separate modules for RAW reading, debayering, channel
//! combination, cropping, FITS writing, display and conversion orchestration.

pub mod raw;
pub mod debayer;
pub mod combine;
pub mod crop;
pub mod fits;
pub mod plot;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use raw::{
    CfaPattern,
    ImageOrientation,
    RawImageData,
    RawImageReader,
    RawLoaderReader,
};

pub use debayer::{
    CpuDebayer,
    RgbImageData,
};

pub use combine::combine_channels;

pub use crop::{
    Centroid,
    CENTROID_CROP_HALF_WIDTH,
    CropWindow,
    ImageAxis,
    centroid_window,
    locate_centroid,
};

pub use fits::{
    FitsWriter,
    OutputNames,
    StandardFitsWriter,
    read_primary_image,
    write_with_overwrite_retry,
};

pub use plot::{
    Figure,
    ImageViewer,
    MinifbViewer,
};

pub use conversions::{
    ConversionConfig,
    ConversionConfigBuilder,
    ConversionReport,
    CropMode,
    OutputMode,
    RawToFitsPipeline,
};

use thiserror::Error;

use crate::image_pipeline::crop::ImageAxis;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode RAW image: {0}")]
    DecodeError(String),

    #[error("Demosaic failed: {0}")]
    DemosaicError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Centroid weight along the {axis} axis sums to zero")]
    ZeroCentroidWeight { axis: ImageAxis },

    #[error("Centroid along the {axis} axis is not finite")]
    NonFiniteCentroid { axis: ImageAxis },

    #[error("Could not derive output file names for {0}: expected a .cr2 or .nef extension")]
    UnrecognizedExtension(String),

    #[error("FITS error: {0}")]
    Fits(#[from] fitsio::errors::Error),

    #[error("Viewer error: {0}")]
    ViewerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;

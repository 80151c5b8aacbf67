//! RAW image reader implementation using the rawloader library.
//!
//! This module provides support for reading various RAW image formats (CR2, NEF, ARW, DNG, etc.)
//! using the rawloader library. It handles decoding RAW sensor data, trimming the masked
//! sensor borders and extracting the metadata the debayer stage needs.

use std::io::Cursor;

use tracing::debug;
use rawloader::{CFA, Orientation, RawImageData as RawloaderImageData};
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raw::types::{CfaPattern, ImageOrientation, RawImageData};
use crate::image_pipeline::raw::reader::RawImageReader;

/// RAW image reader that uses the rawloader library for decoding.
///
/// This reader supports any RAW format that rawloader can decode, including but not limited to:
/// - Canon CR2
/// - Nikon NEF
/// - Sony ARW
pub struct RawLoaderReader;

impl RawImageReader for RawLoaderReader {
    /// Reads and decodes RAW image data from a byte array.
    ///
    /// This method:
    /// 1. Decodes the RAW file using rawloader
    /// 2. Converts the data to u16 format (handles both integer and float RAW data)
    /// 3. Crops the sensor's masked borders away, keeping the active area
    /// 4. Determines the CFA layout of the active area
    /// 5. Records the display orientation
    ///
    /// # Arguments
    ///
    /// * `data` - Raw bytes of the RAW image file
    ///
    /// # Returns
    ///
    /// * `Ok(RawImageData)` - Successfully decoded image with metadata
    /// * `Err(ConversionError)` - Failed to decode the RAW file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use raw2fits::image_pipeline::{RawImageReader, RawLoaderReader};
    ///
    /// let reader = RawLoaderReader;
    /// let raw_bytes = std::fs::read("image.cr2").unwrap();
    /// let image_data = reader.read_raw(&raw_bytes).unwrap();
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawImageData> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        debug!(
            "Decoded {} {}: {}x{}, cpp={}",
            decoded.clean_make, decoded.clean_model, decoded.width, decoded.height, decoded.cpp
        );

        // Integer data is cast directly, float data (normalized 0.0-1.0) is scaled to u16 range
        let samples: Vec<u16> = match &decoded.data {
            RawloaderImageData::Integer(values) => {
                values.iter().map(|&v| v as u16).collect()
            }
            RawloaderImageData::Float(values) => {
                values.iter().map(|&v| (v * u16::MAX as f32) as u16).collect()
            }
        };

        let [top, right, bottom, left] = decoded.crops;
        let width = decoded.width.saturating_sub(left + right);
        let height = decoded.height.saturating_sub(top + bottom);
        if width != decoded.width || height != decoded.height {
            debug!("Cropping to active area: {}x{} at ({}, {})", width, height, left, top);
        }
        let data = crop_samples(&samples, decoded.width, decoded.cpp, top, left, width, height);

        let cfa = match decoded.cpp {
            1 => active_area_cfa(&decoded.cfa, top, left)?,
            3 => CfaPattern::Rggb,
            cpp => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{} components per pixel",
                    cpp
                )));
            }
        };
        let orientation = image_orientation(decoded.orientation);

        debug!(
            "CFA {}, orientation {:?}, black levels {:?}, white levels {:?}",
            cfa, orientation, decoded.blacklevels, decoded.whitelevels
        );

        Ok(RawImageData {
            width,
            height,
            cpp: decoded.cpp,
            data,
            black_levels: decoded.blacklevels,
            cfa,
            orientation,
        })
    }
}

/// Bayer layout seen from the active area's top-left corner at (`left`, `top`).
fn active_area_cfa(cfa: &CFA, top: usize, left: usize) -> Result<CfaPattern> {
    let colors = [
        [cfa.color_at(top, left), cfa.color_at(top, left + 1)],
        [cfa.color_at(top + 1, left), cfa.color_at(top + 1, left + 1)],
    ];
    CfaPattern::from_colors(colors).ok_or_else(|| {
        ConversionError::UnsupportedFormat(format!(
            "CFA layout {:?} ({:?}) is not a 2x2 Bayer pattern",
            cfa.name, colors
        ))
    })
}

/// Unknown orientation tags are treated as normal.
fn image_orientation(orientation: Orientation) -> ImageOrientation {
    match orientation {
        Orientation::Normal | Orientation::Unknown => ImageOrientation::Normal,
        Orientation::HorizontalFlip => ImageOrientation::HorizontalFlip,
        Orientation::Rotate180 => ImageOrientation::Rotate180,
        Orientation::VerticalFlip => ImageOrientation::VerticalFlip,
        Orientation::Transpose => ImageOrientation::Transpose,
        Orientation::Rotate90 => ImageOrientation::Rotate90,
        Orientation::Transverse => ImageOrientation::Transverse,
        Orientation::Rotate270 => ImageOrientation::Rotate270,
    }
}

/// Copies the `width`x`height` window starting at (`left`, `top`) out of a
/// row-major buffer `full_width` pixels wide.
fn crop_samples(
    samples: &[u16],
    full_width: usize,
    cpp: usize,
    top: usize,
    left: usize,
    width: usize,
    height: usize,
) -> Vec<u16> {
    let row_len = full_width * cpp;
    let mut out = Vec::with_capacity(width * height * cpp);
    for row in samples.chunks_exact(row_len).skip(top).take(height) {
        out.extend_from_slice(&row[left * cpp..(left + width) * cpp]);
    }
    out
}

use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use ndarray::Array3;
use tracing::{debug, info};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::debayer::RgbImageData;
use crate::image_pipeline::raw::{CfaPattern, RawImageData};

/// Bytes per 16-bit sample in the demosaic buffers
const BYTES_PER_SAMPLE: usize = 2;

/// Demosaics a Bayer mosaic into a three-channel array in the raw sensor space.
///
/// Black levels are subtracted; no white balance, color matrix, gamma or
/// highlight clipping is applied.
pub struct CpuDebayer;

impl CpuDebayer {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, raw_image: &RawImageData) -> Result<RgbImageData> {
        let width = raw_image.width;
        let height = raw_image.height;

        let pixels = if raw_image.is_mosaic() {
            info!("Starting CPU debayering for image {}x{}", width, height);
            self.demosaic(raw_image)?
        } else {
            debug!("Image already has {} components per pixel, skipping demosaic", raw_image.cpp);
            let samples: Vec<f32> = raw_image
                .data
                .chunks_exact(3)
                .flat_map(|px| {
                    [
                        px[0].saturating_sub(raw_image.black_levels[0]) as f32,
                        px[1].saturating_sub(raw_image.black_levels[1]) as f32,
                        px[2].saturating_sub(raw_image.black_levels[2]) as f32,
                    ]
                })
                .collect();
            samples
        };

        let pixels = Array3::from_shape_vec((height, width, 3), pixels)
            .map_err(|e| ConversionError::DemosaicError(e.to_string()))?;

        Ok(RgbImageData::new(pixels))
    }

    fn demosaic(&self, raw_image: &RawImageData) -> Result<Vec<f32>> {
        let width = raw_image.width;
        let height = raw_image.height;
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        // bayer reads little-endian 16-bit samples from a byte stream
        let bayer_bytes: Vec<u8> = raw_image
            .data
            .chunks_exact(width)
            .enumerate()
            .flat_map(|(row, samples)| {
                samples.iter().enumerate().flat_map(move |(col, &val)| {
                    let black = raw_image.black_levels[raw_image.cfa.color_at(row, col)];
                    val.saturating_sub(black).to_le_bytes()
                })
            })
            .collect();

        let mut output_buf = vec![0u8; width * height * 3 * BYTES_PER_SAMPLE];
        let mut cursor = Cursor::new(&bayer_bytes[..]);

        debug!(
            "Running demosaic with CFA={}, algo=Linear, input bytes {}, output bytes {}",
            raw_image.cfa,
            bayer_bytes.len(),
            output_buf.len()
        );

        {
            let mut output_raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);
            bayer::run_demosaic(
                &mut cursor,
                BayerDepth::Depth16LE,
                bayer_cfa(raw_image.cfa),
                Demosaic::Linear,
                &mut output_raster,
            )
            .map_err(|e| ConversionError::DemosaicError(format!("{:?}", e)))?;
        }

        // RasterMut stores 16-bit samples in native byte order
        Ok(output_buf
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|b| u16::from_ne_bytes([b[0], b[1]]) as f32)
            .collect())
    }
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new()
    }
}

fn bayer_cfa(pattern: CfaPattern) -> CFA {
    match pattern {
        CfaPattern::Rggb => CFA::RGGB,
        CfaPattern::Bggr => CFA::BGGR,
        CfaPattern::Grbg => CFA::GRBG,
        CfaPattern::Gbrg => CFA::GBRG,
    }
}

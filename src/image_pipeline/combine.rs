//! Channel combination
//!
//! Collapses the three raw color channels into one monochrome intensity
//! plane. Values are summed as-is, so the result keeps the full raw dynamic
//! range and may exceed any display range.

use ndarray::{Array2, ArrayView3, Axis};

use crate::image_pipeline::debayer::RgbImageData;
use crate::image_pipeline::debayer::types::{BLUE, GREEN, RED};

/// Sums red, green and blue at every pixel of a (height, width, 3) array.
pub fn combine_channels(rgb: ArrayView3<'_, f32>) -> Array2<f32> {
    let red = rgb.index_axis(Axis(2), RED);
    let green = rgb.index_axis(Axis(2), GREEN);
    let blue = rgb.index_axis(Axis(2), BLUE);
    &red + &green + &blue
}

impl RgbImageData {
    pub fn combine(&self) -> Array2<f32> {
        combine_channels(self.view())
    }
}

//! Types for debayering operations

use ndarray::{Array3, ArrayView3, Axis, s};

use crate::image_pipeline::crop::CropWindow;
use crate::image_pipeline::raw::ImageOrientation;

/// Red, green and blue channel indices along the last axis
pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;

/// RGB image data after debayering, in the sensor's raw color space
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImageData {
    /// Samples with shape (height, width, 3)
    pub pixels: Array3<f32>,
}

impl RgbImageData {
    pub fn new(pixels: Array3<f32>) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.pixels.view()
    }

    /// Copies out rows `[ymin, ymax)` and columns `[xmin, xmax)`.
    ///
    /// Bounds are resolved like slice indices: negative values count from the
    /// end, values past the end clamp, and an inverted range is empty.
    pub fn crop(&self, window: &CropWindow) -> RgbImageData {
        let (rows, cols) = window.resolve(self.width(), self.height());
        let cropped = self.pixels.slice(s![rows, cols, ..]).to_owned();
        RgbImageData::new(cropped)
    }

    /// Rotates or flips the image into its display orientation.
    pub fn oriented(self, orientation: ImageOrientation) -> RgbImageData {
        if orientation == ImageOrientation::Normal {
            return self;
        }

        let (transpose, flip_rows, flip_cols) = orientation.to_flips();
        let mut view = self.pixels.view();
        if transpose {
            view.swap_axes(0, 1);
        }
        if flip_rows {
            view.invert_axis(Axis(0));
        }
        if flip_cols {
            view.invert_axis(Axis(1));
        }
        RgbImageData::new(view.as_standard_layout().into_owned())
    }

    /// Largest sample value, or 0 for an empty image.
    pub fn max_value(&self) -> f32 {
        self.pixels.iter().copied().fold(0.0, f32::max)
    }
}

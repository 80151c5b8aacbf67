//! Brightness-weighted centroid and the fixed-size window around it.

use ndarray::{ArrayView1, ArrayView2};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::crop::types::{CropWindow, ImageAxis};

/// Half the side of the square window cut around the centroid.
pub const CENTROID_CROP_HALF_WIDTH: i64 = 1250;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

/// Locates the brightness centroid of a combined image.
///
/// Each column is weighted by its mean value and the x coordinate is the
/// weighted mean column index; y is computed the same way from the rows.
/// Column (row) sums are used as weights: they differ from the means by a
/// constant factor that cancels.
///
/// Fails with [`ConversionError::ZeroCentroidWeight`] when an axis carries no
/// weight at all (e.g. a black or empty frame).
pub fn locate_centroid(combined: ArrayView2<'_, f32>) -> Result<Centroid> {
    let column_weights = combined.columns().into_iter().map(lane_sum);
    let row_weights = combined.rows().into_iter().map(lane_sum);

    let centroid = Centroid {
        x: weighted_index_mean(column_weights, ImageAxis::X)?,
        y: weighted_index_mean(row_weights, ImageAxis::Y)?,
    };
    debug!("Centroid at ({:.2}, {:.2})", centroid.x, centroid.y);
    Ok(centroid)
}

/// Square window of side `2 * half_width` around the centroid, clamped to
/// `[0, dimension - 1]` on each axis.
pub fn centroid_window(centroid: Centroid, width: usize, height: usize, half_width: i64) -> CropWindow {
    let (xmin, xmax) = clamped_span(centroid.x, half_width, width);
    let (ymin, ymax) = clamped_span(centroid.y, half_width, height);
    CropWindow::new(xmin, xmax, ymin, ymax)
}

fn lane_sum(lane: ArrayView1<'_, f32>) -> f64 {
    lane.iter().map(|&v| v as f64).sum()
}

fn weighted_index_mean(weights: impl Iterator<Item = f64>, axis: ImageAxis) -> Result<f64> {
    let (moment, total) = weights
        .enumerate()
        .fold((0.0_f64, 0.0_f64), |(moment, total), (index, weight)| {
            (moment + index as f64 * weight, total + weight)
        });

    if total == 0.0 {
        return Err(ConversionError::ZeroCentroidWeight { axis });
    }
    let mean = moment / total;
    if !mean.is_finite() {
        return Err(ConversionError::NonFiniteCentroid { axis });
    }
    Ok(mean)
}

fn clamped_span(center: f64, half_width: i64, len: usize) -> (i64, i64) {
    let center = center.trunc() as i64;
    let min = (center - half_width).max(0);
    let max = (center + half_width).min(len as i64 - 1);
    (min, max)
}

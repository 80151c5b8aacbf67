//! Cropping module
//!
//! Crop windows, either given explicitly or derived from the image's
//! brightness-weighted centroid.

pub mod centroid;
pub mod types;

pub use centroid::{Centroid, CENTROID_CROP_HALF_WIDTH, centroid_window, locate_centroid};
pub use types::{CropWindow, ImageAxis};

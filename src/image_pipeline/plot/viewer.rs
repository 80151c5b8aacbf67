use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::debayer::RgbImageData;

/// One titled image to display.
#[derive(Debug, Clone, Copy)]
pub struct Figure<'a> {
    pub title: &'a str,
    pub image: &'a RgbImageData,
}

pub trait ImageViewer {
    /// Displays every figure in its own window and returns once the user
    /// has closed them all.
    fn show(&self, figures: &[Figure<'_>]) -> Result<()>;
}

use std::path::Path;

use fitsio::FitsFile;
use fitsio::images::{ImageDescription, ImageType};
use ndarray::ArrayView2;
use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::writer::FitsWriter;

/// Writes 32-bit float primary images through cfitsio.
///
/// Array row 0 becomes the first image row in the file (FITS `y = 1`), with
/// NAXIS1 = width and NAXIS2 = height.
pub struct StandardFitsWriter;

impl FitsWriter for StandardFitsWriter {
    fn write_fits(&self, image: ArrayView2<'_, f32>, path: &Path) -> Result<()> {
        let (height, width) = image.dim();
        debug!("Encoding FITS image: {}x{} -> {}", width, height, path.display());

        // fitsio takes dimensions slowest-axis first
        let dimensions = [height, width];
        let description = ImageDescription {
            data_type: ImageType::Float,
            dimensions: &dimensions,
        };

        let mut fptr = FitsFile::create(path)
            .with_custom_primary(&description)
            .open()?;
        let hdu = fptr.primary_hdu()?;

        let data: Vec<f32> = image.iter().copied().collect();
        hdu.write_image(&mut fptr, &data)?;

        debug!("FITS encoding complete");
        Ok(())
    }
}

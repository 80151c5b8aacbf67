use std::path::Path;

use fitsio::FitsFile;
use fitsio::hdu::HduInfo;
use ndarray::Array2;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Reads the primary HDU of a FITS file back into a (height, width) array.
pub fn read_primary_image<P: AsRef<Path>>(path: P) -> Result<Array2<f32>> {
    let path = path.as_ref();
    let mut fptr = FitsFile::open(path)?;
    let hdu = fptr.primary_hdu()?;

    let shape = match &hdu.info {
        HduInfo::ImageInfo { shape, .. } if shape.len() == 2 => (shape[0], shape[1]),
        _ => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "{}: primary HDU is not a 2D image",
                path.display()
            )));
        }
    };

    let data: Vec<f32> = hdu.read_image(&mut fptr)?;
    Array2::from_shape_vec(shape, data).map_err(|e| {
        ConversionError::UnsupportedFormat(format!("{}: {}", path.display(), e))
    })
}

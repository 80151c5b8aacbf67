use std::path::Path;

use ndarray::ArrayView2;
use tracing::warn;

use crate::image_pipeline::common::error::Result;

pub trait FitsWriter {
    /// Writes `image` as the primary HDU of a new file at `path`.
    ///
    /// Implementations must fail rather than replace an existing file.
    fn write_fits(&self, image: ArrayView2<'_, f32>, path: &Path) -> Result<()>;
}

/// Writes `image` to `path`; if that fails, deletes whatever is at `path`
/// and tries exactly once more.
///
/// Errors from the delete or from the second attempt are returned as-is.
pub fn write_with_overwrite_retry<W: FitsWriter + ?Sized>(
    writer: &W,
    image: ArrayView2<'_, f32>,
    path: &Path,
) -> Result<()> {
    match writer.write_fits(image, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Write failed, removing existing file and retrying");
            std::fs::remove_file(path)?;
            writer.write_fits(image, path)
        }
    }
}

//! FITS writing module
//!
//! This module provides FITS file writing for combined images, output file
//! naming and the one-shot overwrite retry.

mod writer;
mod standard_fits_writer;
mod reader;
pub mod naming;

pub use writer::{FitsWriter, write_with_overwrite_retry};
pub use standard_fits_writer::StandardFitsWriter;
pub use reader::read_primary_image;
pub use naming::OutputNames;

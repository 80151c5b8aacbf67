//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use crate::image_pipeline::conversions::{ConversionConfig, CropMode, OutputMode};
use crate::image_pipeline::crop::CropWindow;
use crate::image_pipeline::crop::types::{DEFAULT_XMAX, DEFAULT_XMIN, DEFAULT_YMAX, DEFAULT_YMIN};

#[derive(Parser, Debug)]
#[command(author, version, about = "Transforms raw camera data to fits")]
pub struct Args {
    /// Raw image to convert (.cr2 or .nef for file output)
    pub image: PathBuf,

    /// Minimum pixel in x saved in the reduced fits file (requires --manual)
    #[arg(long, default_value_t = DEFAULT_XMIN, allow_negative_numbers = true)]
    pub xmin: i64,

    /// Maximum pixel in x saved in the reduced fits file (requires --manual)
    #[arg(long, default_value_t = DEFAULT_XMAX, allow_negative_numbers = true)]
    pub xmax: i64,

    /// Minimum pixel in y saved in the reduced fits file (requires --manual)
    #[arg(long, default_value_t = DEFAULT_YMIN, allow_negative_numbers = true)]
    pub ymin: i64,

    /// Maximum pixel in y saved in the reduced fits file (requires --manual)
    #[arg(long, default_value_t = DEFAULT_YMAX, allow_negative_numbers = true)]
    pub ymax: i64,

    /// Use the explicit bounds instead of the centroid (requires --crop)
    #[arg(long)]
    pub manual: bool,

    /// Plot the data instead of saving it
    #[arg(long)]
    pub plot: bool,

    /// Crop the image and save a reduced fits file
    #[arg(long)]
    pub crop: bool,
}

impl Args {
    pub fn window(&self) -> CropWindow {
        CropWindow::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }

    /// Flags are not cross-checked: `--manual` and the bounds only matter
    /// together with `--crop`.
    pub fn to_config(&self) -> ConversionConfig {
        let crop = match (self.crop, self.manual) {
            (false, _) => None,
            (true, true) => Some(CropMode::Manual(self.window())),
            (true, false) => Some(CropMode::Centroid),
        };
        let output = if self.plot { OutputMode::Plot } else { OutputMode::Write };

        ConversionConfig::builder()
            .crop(crop)
            .output(output)
            .build()
    }
}

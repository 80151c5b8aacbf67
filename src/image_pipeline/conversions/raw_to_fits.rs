use std::path::Path;

use ndarray::Array2;
use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::types::{ConversionConfig, ConversionReport, CropMode, OutputMode},
    crop::{CropWindow, centroid_window, locate_centroid},
    debayer::{CpuDebayer, RgbImageData},
    fits::{FitsWriter, OutputNames, StandardFitsWriter, write_with_overwrite_retry},
    plot::{FIGURE_SIZE, Figure, ImageViewer, MinifbViewer},
    raw::{RawImageReader, RawLoaderReader},
};

/// The cropped region of an image, in both forms the output stage needs
#[derive(Debug, Clone)]
pub struct CroppedImage {
    pub window: CropWindow,
    pub rgb: RgbImageData,
    pub combined: Array2<f32>,
}

/// Result of the combine and crop stages
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub combined: Array2<f32>,
    pub cropped: Option<CroppedImage>,
}

pub struct RawToFitsPipeline<R: RawImageReader, W: FitsWriter, V: ImageViewer> {
    reader: R,
    writer: W,
    viewer: V,
    debayer: CpuDebayer,
    config: ConversionConfig,
}

impl RawToFitsPipeline<RawLoaderReader, StandardFitsWriter, MinifbViewer> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: RawLoaderReader,
            writer: StandardFitsWriter,
            viewer: MinifbViewer::new(FIGURE_SIZE),
            debayer: CpuDebayer::new(),
            config,
        }
    }
}

impl<R: RawImageReader, W: FitsWriter, V: ImageViewer> RawToFitsPipeline<R, W, V> {
    pub fn with_custom(reader: R, writer: W, viewer: V, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            viewer,
            debayer: CpuDebayer::new(),
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Decodes raw file bytes into a three-channel image in display orientation.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn decode(&self, input_data: &[u8]) -> Result<RgbImageData> {
        let raw_image = {
            let _span = tracing::info_span!("decode_raw").entered();
            self.reader.read_raw(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raw_image.width,
                height = raw_image.height
            ).entered();
            self.validate_dimensions(raw_image.width, raw_image.height)?;
        }

        let rgb = {
            let _span = tracing::info_span!("debayer").entered();
            self.debayer.process(&raw_image)?
        };

        let _span = tracing::info_span!("orient", orientation = ?raw_image.orientation).entered();
        Ok(rgb.oriented(raw_image.orientation))
    }

    /// Combines the channels and, if configured, crops.
    #[instrument(skip(self, rgb), fields(width = rgb.width(), height = rgb.height()))]
    pub fn process(&self, rgb: &RgbImageData) -> Result<ProcessedImage> {
        let combined = {
            let _span = tracing::info_span!("combine").entered();
            rgb.combine()
        };

        let cropped = match self.config.crop {
            None => None,
            Some(mode) => {
                let window = match mode {
                    CropMode::Manual(window) => window,
                    CropMode::Centroid => {
                        let _span = tracing::info_span!("locate_centroid").entered();
                        let centroid = locate_centroid(combined.view())?;
                        let window = centroid_window(
                            centroid,
                            rgb.width(),
                            rgb.height(),
                            self.config.centroid_half_width,
                        );
                        info!(x = centroid.x, y = centroid.y, "Centroid located");
                        window
                    }
                };

                let _span = tracing::info_span!("crop", %window).entered();
                let cropped_rgb = rgb.crop(&window);
                let cropped_combined = cropped_rgb.combine();
                info!(
                    width = cropped_rgb.width(),
                    height = cropped_rgb.height(),
                    "Cropped image"
                );
                Some(CroppedImage {
                    window,
                    rgb: cropped_rgb,
                    combined: cropped_combined,
                })
            }
        };

        Ok(ProcessedImage { combined, cropped })
    }

    /// Runs the whole conversion on already-read file bytes. `image_path` is
    /// only used to name the outputs.
    #[instrument(skip(self, input_data), fields(image = %image_path.display()))]
    pub fn convert(&self, input_data: &[u8], image_path: &Path) -> Result<ConversionReport> {
        info!("Starting RAW to FITS conversion");

        let rgb = self.decode(input_data)?;
        let processed = self.process(&rgb)?;

        let names = OutputNames::from_input(image_path);
        if names.is_none() {
            println!("could not detect format in image {}", image_path.display());
        }

        let written = match self.config.output {
            OutputMode::Write => {
                let names = names.ok_or_else(|| {
                    ConversionError::UnrecognizedExtension(image_path.display().to_string())
                })?;
                self.write_outputs(&processed, &names)?
            }
            OutputMode::Plot => {
                self.plot(&rgb, &processed)?;
                Vec::new()
            }
        };

        info!(
            width = rgb.width(),
            height = rgb.height(),
            files = written.len(),
            "Conversion complete"
        );

        Ok(ConversionReport {
            width: rgb.width(),
            height: rgb.height(),
            crop_window: processed.cropped.as_ref().map(|c| c.window),
            written,
        })
    }

    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<ConversionReport> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Converting file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.convert(&input_data, input_path)
    }

    fn write_outputs(&self, processed: &ProcessedImage, names: &OutputNames) -> Result<Vec<std::path::PathBuf>> {
        let _span = tracing::info_span!("write_fits").entered();
        let mut written = Vec::new();

        println!("full fits file saved to {}", names.full.display());
        write_with_overwrite_retry(&self.writer, processed.combined.view(), &names.full)?;
        written.push(names.full.clone());

        if let Some(cropped) = &processed.cropped {
            println!("reduced fits file saved to {}", names.reduced.display());
            write_with_overwrite_retry(&self.writer, cropped.combined.view(), &names.reduced)?;
            written.push(names.reduced.clone());
        }

        Ok(written)
    }

    fn plot(&self, rgb: &RgbImageData, processed: &ProcessedImage) -> Result<()> {
        let _span = tracing::info_span!("plot").entered();
        let mut figures = vec![Figure { title: "full image", image: rgb }];

        if let Some(cropped) = &processed.cropped {
            println!("{}", cropped.window);
            figures.push(Figure { title: "cropped image", image: &cropped.rgb });
        }

        self.viewer.show(&figures)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }
}

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ndarray::{Array2, ArrayView2, s};
use tempfile::tempdir;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::{
    ConversionConfig, CropMode, OutputMode, RawToFitsPipeline,
};
use crate::image_pipeline::crop::{CropWindow, ImageAxis};
use crate::image_pipeline::fits::{FitsWriter, StandardFitsWriter, read_primary_image};
use crate::image_pipeline::plot::{Figure, ImageViewer};
use crate::image_pipeline::raw::{CfaPattern, ImageOrientation, RawImageData, RawImageReader};

/// Three-component raw image whose samples are `f(y, x, channel)`
fn rgb_raw(width: usize, height: usize, f: impl Fn(usize, usize, usize) -> u16) -> RawImageData {
    let data = (0..height)
        .flat_map(|y| (0..width).flat_map(move |x| (0..3).map(move |c| (y, x, c))))
        .map(|(y, x, c)| f(y, x, c))
        .collect();
    RawImageData {
        width,
        height,
        cpp: 3,
        data,
        black_levels: [0; 4],
        cfa: CfaPattern::Rggb,
        orientation: ImageOrientation::Normal,
    }
}

fn gradient_raw(width: usize, height: usize) -> RawImageData {
    rgb_raw(width, height, |y, x, c| (y * 7 + x * 3 + c) as u16)
}

struct MockReader {
    should_fail: bool,
    mock_data: RawImageData,
}

impl RawImageReader for MockReader {
    fn read_raw(&self, _data: &[u8]) -> Result<RawImageData> {
        if self.should_fail {
            return Err(ConversionError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone())
    }
}

type Written = Rc<RefCell<Vec<(PathBuf, Array2<f32>)>>>;

struct MockWriter {
    written: Written,
}

impl FitsWriter for MockWriter {
    fn write_fits(&self, image: ArrayView2<'_, f32>, path: &Path) -> Result<()> {
        self.written.borrow_mut().push((path.to_path_buf(), image.to_owned()));
        Ok(())
    }
}

type Shown = Rc<RefCell<Vec<(String, usize, usize)>>>;

struct MockViewer {
    shown: Shown,
}

impl ImageViewer for MockViewer {
    fn show(&self, figures: &[Figure<'_>]) -> Result<()> {
        let mut shown = self.shown.borrow_mut();
        for figure in figures {
            shown.push((figure.title.to_string(), figure.image.width(), figure.image.height()));
        }
        Ok(())
    }
}

struct Harness {
    pipeline: RawToFitsPipeline<MockReader, MockWriter, MockViewer>,
    written: Written,
    shown: Shown,
}

fn harness(raw: RawImageData, config: ConversionConfig) -> Harness {
    let written = Written::default();
    let shown = Shown::default();
    let pipeline = RawToFitsPipeline::with_custom(
        MockReader { should_fail: false, mock_data: raw },
        MockWriter { written: written.clone() },
        MockViewer { shown: shown.clone() },
        config,
    );
    Harness { pipeline, written, shown }
}

#[test]
fn test_config_builder() {
    let config = ConversionConfig::builder()
        .crop(Some(CropMode::Centroid))
        .output(OutputMode::Plot)
        .centroid_half_width(40)
        .build();

    assert_eq!(config.crop, Some(CropMode::Centroid));
    assert_eq!(config.output, OutputMode::Plot);
    assert_eq!(config.centroid_half_width, 40);
}

#[test]
fn test_config_defaults() {
    let config = ConversionConfig::builder().build();
    assert_eq!(config, ConversionConfig::default());
    assert_eq!(config.crop, None);
    assert_eq!(config.output, OutputMode::Write);
    assert_eq!(config.centroid_half_width, 1250);
}

#[test]
fn test_write_mode_writes_full_image_only() {
    let h = harness(gradient_raw(12, 8), ConversionConfig::default());

    let report = h.pipeline.convert(b"fake raw data", Path::new("night/IMG_1.CR2")).unwrap();

    let written = h.written.borrow();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].0, PathBuf::from("night/IMG_1.fits"));
    assert_eq!(written[0].1.dim(), (8, 12));
    // channel sum of (y * 7 + x * 3 + c) over c = 0, 1, 2
    assert_eq!(written[0].1[[2, 5]], (3 * (2 * 7 + 5 * 3) + 3) as f32);

    assert_eq!(report.width, 12);
    assert_eq!(report.height, 8);
    assert_eq!(report.crop_window, None);
    assert_eq!(report.written, vec![PathBuf::from("night/IMG_1.fits")]);
    assert!(h.shown.borrow().is_empty());
}

#[test]
fn test_portrait_frame_is_rotated_before_combining() {
    // stored landscape, 12x8, with a bright pixel at row 1, column 9
    let mut raw = rgb_raw(12, 8, |y, x, _| if (y, x) == (1, 9) { 300 } else { 0 });
    raw.orientation = ImageOrientation::Rotate90;
    let config = ConversionConfig::builder()
        .crop(Some(CropMode::Centroid))
        .centroid_half_width(2)
        .build();
    let h = harness(raw, config);

    let report = h.pipeline.convert(b"", Path::new("portrait.CR2")).unwrap();

    assert_eq!((report.width, report.height), (8, 12));
    let written = h.written.borrow();
    let full = &written[0].1;
    assert_eq!(full.dim(), (12, 8));
    assert_eq!(full[[9, 6]], 900.0);
    assert_eq!(full.sum(), 900.0);
    assert_eq!(report.crop_window, Some(CropWindow::new(4, 7, 7, 11)));
}

#[test]
fn test_manual_crop_matches_direct_slicing() {
    let window = CropWindow::new(10, 50, 5, 40);
    let config = ConversionConfig::builder()
        .crop(Some(CropMode::Manual(window)))
        .build();
    let h = harness(gradient_raw(64, 48), config);

    let report = h.pipeline.convert(b"", Path::new("frame.nef")).unwrap();

    let written = h.written.borrow();
    assert_eq!(written.len(), 2);
    let (full_path, full) = &written[0];
    let (reduced_path, reduced) = &written[1];
    assert_eq!(full_path, &PathBuf::from("frame.fits"));
    assert_eq!(reduced_path, &PathBuf::from("frame_reduced.fits"));

    assert_eq!(reduced.dim(), (35, 40));
    assert_eq!(reduced, &full.slice(s![5..40, 10..50]).to_owned());
    assert_eq!(report.crop_window, Some(window));
}

#[test]
fn test_centroid_crop_centers_on_bright_spot() {
    let raw = rgb_raw(100, 80, |y, x, _| if (y, x) == (30, 60) { 900 } else { 0 });
    let config = ConversionConfig::builder()
        .crop(Some(CropMode::Centroid))
        .centroid_half_width(10)
        .build();
    let h = harness(raw, config);

    let report = h.pipeline.convert(b"", Path::new("star.cr2")).unwrap();

    assert_eq!(report.crop_window, Some(CropWindow::new(50, 70, 20, 40)));
    let written = h.written.borrow();
    let reduced = &written[1].1;
    assert_eq!(reduced.dim(), (20, 20));
    assert_eq!(reduced[[10, 10]], 2700.0);
    assert_eq!(reduced.sum(), 2700.0);
}

#[test]
fn test_centroid_crop_with_default_box_clamps_to_small_image() {
    let raw = rgb_raw(40, 30, |_, _, _| 1);
    let config = ConversionConfig::builder().crop(Some(CropMode::Centroid)).build();
    let h = harness(raw, config);

    let report = h.pipeline.convert(b"", Path::new("flat.cr2")).unwrap();

    assert_eq!(report.crop_window, Some(CropWindow::new(0, 39, 0, 29)));
    // the window's upper bounds are exclusive, so the last row and column are dropped
    assert_eq!(h.written.borrow()[1].1.dim(), (29, 39));
}

#[test]
fn test_black_frame_centroid_crop_fails() {
    let raw = rgb_raw(16, 16, |_, _, _| 0);
    let config = ConversionConfig::builder().crop(Some(CropMode::Centroid)).build();
    let h = harness(raw, config);

    let result = h.pipeline.convert(b"", Path::new("dark.cr2"));

    assert!(matches!(
        result,
        Err(ConversionError::ZeroCentroidWeight { axis: ImageAxis::X })
    ));
    assert!(h.written.borrow().is_empty());
}

#[test]
fn test_unrecognized_extension_fails_in_write_mode() {
    let h = harness(gradient_raw(4, 4), ConversionConfig::default());

    let result = h.pipeline.convert(b"", Path::new("frame.arw"));

    assert!(matches!(result, Err(ConversionError::UnrecognizedExtension(_))));
    assert!(h.written.borrow().is_empty());
}

#[test]
fn test_unrecognized_extension_is_fine_in_plot_mode() {
    let config = ConversionConfig::builder().output(OutputMode::Plot).build();
    let h = harness(gradient_raw(4, 4), config);

    let report = h.pipeline.convert(b"", Path::new("frame.arw")).unwrap();

    assert!(report.written.is_empty());
    assert_eq!(*h.shown.borrow(), vec![("full image".to_string(), 4, 4)]);
}

#[test]
fn test_plot_mode_shows_both_figures_and_writes_nothing() {
    let config = ConversionConfig::builder()
        .output(OutputMode::Plot)
        .crop(Some(CropMode::Manual(CropWindow::new(1, 5, 2, 4))))
        .build();
    let h = harness(gradient_raw(10, 6), config);

    let report = h.pipeline.convert(b"", Path::new("frame.cr2")).unwrap();

    assert!(h.written.borrow().is_empty());
    assert!(report.written.is_empty());
    assert_eq!(
        *h.shown.borrow(),
        vec![
            ("full image".to_string(), 10, 6),
            ("cropped image".to_string(), 4, 2),
        ]
    );
}

#[test]
fn test_manual_bounds_ignored_without_crop() {
    // a manual window is only honoured through a crop request
    let h = harness(gradient_raw(10, 6), ConversionConfig::default());
    let report = h.pipeline.convert(b"", Path::new("frame.cr2")).unwrap();
    assert_eq!(report.crop_window, None);
    assert_eq!(h.written.borrow().len(), 1);
}

#[test]
fn test_inverted_window_yields_empty_crop() {
    let config = ConversionConfig::builder()
        .crop(Some(CropMode::Manual(CropWindow::new(8, 2, 0, 4))))
        .build();
    let h = harness(gradient_raw(10, 6), config);

    h.pipeline.convert(b"", Path::new("frame.cr2")).unwrap();

    assert_eq!(h.written.borrow()[1].1.dim(), (4, 0));
}

#[test]
fn test_reader_failure() {
    let written = Written::default();
    let pipeline = RawToFitsPipeline::with_custom(
        MockReader { should_fail: true, mock_data: gradient_raw(2, 2) },
        MockWriter { written: written.clone() },
        MockViewer { shown: Shown::default() },
        ConversionConfig::default(),
    );

    let result = pipeline.convert(b"fake raw data", Path::new("frame.cr2"));

    assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    assert!(written.borrow().is_empty());
}

#[test]
fn test_dimension_validation_failure() {
    let h = harness(gradient_raw(0, 5), ConversionConfig::default());
    let result = h.pipeline.convert(b"", Path::new("frame.cr2"));
    assert!(matches!(result, Err(ConversionError::InvalidDimensions(0, 5))));
}

#[test]
fn test_missing_input_file() {
    let h = harness(gradient_raw(2, 2), ConversionConfig::default());
    let result = h.pipeline.convert_file("/nonexistent/frame.cr2");
    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
}

#[test]
fn test_convert_file_overwrites_existing_outputs() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("frame.cr2");
    std::fs::write(&input, b"raw bytes").unwrap();
    let full = dir.path().join("frame.fits");
    let reduced = dir.path().join("frame_reduced.fits");
    std::fs::write(&full, b"stale full").unwrap();
    std::fs::write(&reduced, b"stale reduced").unwrap();

    let config = ConversionConfig::builder()
        .crop(Some(CropMode::Manual(CropWindow::new(1, 4, 1, 3))))
        .build();
    let pipeline = RawToFitsPipeline::with_custom(
        MockReader { should_fail: false, mock_data: gradient_raw(6, 5) },
        StandardFitsWriter,
        MockViewer { shown: Shown::default() },
        config,
    );

    let report = pipeline.convert_file(&input).unwrap();

    assert_eq!(report.written, vec![full.clone(), reduced.clone()]);
    let full_image = read_primary_image(&full).unwrap();
    let reduced_image = read_primary_image(&reduced).unwrap();
    assert_eq!(full_image.dim(), (5, 6));
    assert_eq!(reduced_image, full_image.slice(s![1..3, 1..4]).to_owned());
}

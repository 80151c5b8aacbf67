//! RAW image data types

use std::fmt;

/// 2x2 Bayer layout of the active sensor area, named row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaPattern {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl CfaPattern {
    /// Builds the pattern from the color indices (0 = R, 1 = G, 2 = B) found
    /// at the four phase positions `[[top-left, top-right], [bottom-left, bottom-right]]`.
    pub fn from_colors(colors: [[usize; 2]; 2]) -> Option<Self> {
        match colors {
            [[0, 1], [1, 2]] => Some(Self::Rggb),
            [[2, 1], [1, 0]] => Some(Self::Bggr),
            [[1, 0], [2, 1]] => Some(Self::Grbg),
            [[1, 2], [0, 1]] => Some(Self::Gbrg),
            _ => None,
        }
    }

    /// Color index (0 = R, 1 = G, 2 = B) at the given pixel.
    pub fn color_at(&self, row: usize, col: usize) -> usize {
        let colors = match self {
            Self::Rggb => [[0, 1], [1, 2]],
            Self::Bggr => [[2, 1], [1, 0]],
            Self::Grbg => [[1, 0], [2, 1]],
            Self::Gbrg => [[1, 2], [0, 1]],
        };
        colors[row % 2][col % 2]
    }
}

impl fmt::Display for CfaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rggb => "RGGB",
            Self::Bggr => "BGGR",
            Self::Grbg => "GRBG",
            Self::Gbrg => "GBRG",
        };
        f.write_str(name)
    }
}

/// How the stored sensor image must be transformed for display, following
/// the EXIF orientation tag (1 to 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageOrientation {
    #[default]
    Normal,
    HorizontalFlip,
    Rotate180,
    VerticalFlip,
    Transpose,
    /// Rotate 90 degrees clockwise
    Rotate90,
    Transverse,
    /// Rotate 90 degrees counter-clockwise
    Rotate270,
}

impl ImageOrientation {
    /// The transform as `(transpose, flip_rows, flip_cols)`, applied in that order.
    pub fn to_flips(self) -> (bool, bool, bool) {
        match self {
            Self::Normal => (false, false, false),
            Self::HorizontalFlip => (false, false, true),
            Self::Rotate180 => (false, true, true),
            Self::VerticalFlip => (false, true, false),
            Self::Transpose => (true, false, false),
            Self::Rotate90 => (true, false, true),
            Self::Transverse => (true, true, true),
            Self::Rotate270 => (true, true, false),
        }
    }

    /// Whether displayed width and height are swapped relative to the sensor.
    pub fn swaps_axes(self) -> bool {
        self.to_flips().0
    }
}

/// Represents decoded RAW image data, cropped to the active sensor area
#[derive(Debug, Clone)]
pub struct RawImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Components per pixel: 1 for a Bayer mosaic, 3 for linear (already RGB) raws
    pub cpp: usize,
    /// Pixel samples, row-major, `cpp` values per pixel
    pub data: Vec<u16>,
    /// Black level per color index (R, G, B, E)
    pub black_levels: [u16; 4],
    /// Bayer layout; ignored when `cpp == 3`
    pub cfa: CfaPattern,
    /// Display orientation, applied after demosaicing
    pub orientation: ImageOrientation,
}

impl RawImageData {
    pub fn is_mosaic(&self) -> bool {
        self.cpp == 1
    }
}

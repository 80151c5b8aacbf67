//! Crop window types

use std::fmt;
use std::ops::Range;

pub const DEFAULT_XMIN: i64 = 1000;
pub const DEFAULT_XMAX: i64 = 3000;
pub const DEFAULT_YMIN: i64 = 1000;
pub const DEFAULT_YMAX: i64 = 2200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAxis {
    X,
    Y,
}

impl fmt::Display for ImageAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageAxis::X => f.write_str("x"),
            ImageAxis::Y => f.write_str("y"),
        }
    }
}

/// Half-open pixel window `[xmin, xmax) x [ymin, ymax)`.
///
/// Bounds are not validated; see [`CropWindow::resolve`] for how
/// out-of-range and inverted windows are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub xmin: i64,
    pub xmax: i64,
    pub ymin: i64,
    pub ymax: i64,
}

impl Default for CropWindow {
    fn default() -> Self {
        Self {
            xmin: DEFAULT_XMIN,
            xmax: DEFAULT_XMAX,
            ymin: DEFAULT_YMIN,
            ymax: DEFAULT_YMAX,
        }
    }
}

impl CropWindow {
    pub fn new(xmin: i64, xmax: i64, ymin: i64, ymax: i64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }

    /// Row and column index ranges of this window inside a
    /// `width`x`height` image.
    ///
    /// Negative bounds count back from the end of the axis, bounds past the
    /// end clamp to it, and `min >= max` gives an empty range.
    pub fn resolve(&self, width: usize, height: usize) -> (Range<usize>, Range<usize>) {
        let rows = resolve_range(self.ymin, self.ymax, height);
        let cols = resolve_range(self.xmin, self.xmax, width);
        (rows, cols)
    }
}

impl fmt::Display for CropWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "--xmin {} --xmax {} --ymin {} --ymax {}",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

fn resolve_bound(bound: i64, len: usize) -> usize {
    let len_i = len as i64;
    let bound = if bound < 0 { bound + len_i } else { bound };
    bound.clamp(0, len_i) as usize
}

fn resolve_range(start: i64, stop: i64, len: usize) -> Range<usize> {
    let start = resolve_bound(start, len);
    let stop = resolve_bound(stop, len);
    start..stop.max(start)
}

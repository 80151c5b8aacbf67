//! Output file naming
//!
//! Output names are derived from the input path by dropping its last four
//! characters (a dot plus a three-letter extension). Only `.cr2` and `.nef`
//! inputs are recognized, case-insensitively.

use std::path::{Path, PathBuf};

const RECOGNIZED_EXTENSIONS: [&str; 2] = ["cr2", "nef"];

/// Characters stripped from the input path to form the output stem
const EXTENSION_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    /// `<stem>.fits`, the full combined image
    pub full: PathBuf,
    /// `<stem>_reduced.fits`, the cropped combined image
    pub reduced: PathBuf,
}

impl OutputNames {
    /// Returns `None` when the input does not end in a recognized extension.
    pub fn from_input(image: &Path) -> Option<Self> {
        let image = image.to_string_lossy();
        let lower = image.to_lowercase();
        if !RECOGNIZED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            return None;
        }

        let keep = image.chars().count().saturating_sub(EXTENSION_LEN);
        let stem: String = image.chars().take(keep).collect();
        Some(Self {
            full: PathBuf::from(format!("{stem}.fits")),
            reduced: PathBuf::from(format!("{stem}_reduced.fits")),
        })
    }
}

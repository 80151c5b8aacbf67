//! Image display module
//!
//! Shows RGB images in square windows instead of writing them to disk.

mod viewer;
mod render;
mod minifb_viewer;

pub use viewer::{Figure, ImageViewer};
pub use render::{FIGURE_SIZE, render_figure};
pub use minifb_viewer::MinifbViewer;
